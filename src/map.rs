//! Decoded map metadata.
//!
//! [`MapInfo`] collects every field the header chunks provide. Fields whose
//! chunk is missing from the header keep their default value: empty strings,
//! zero numbers, `false` flags and `None` for the editor mode.
//!
//! Text fields are returned verbatim, including in-game styling codes such
//! as `$o$f00`.

/// Editor mode a map was built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// The simple (puzzle-style) editor.
    Simple,

    /// The advanced editor.
    Advanced,
}

impl EditorKind {
    /// Decodes the editor flag from the base chunk: `1` is simple, anything
    /// else advanced.
    #[must_use]
    pub fn from_flag(flag: u32) -> Self {
        if flag == 1 {
            EditorKind::Simple
        } else {
            EditorKind::Advanced
        }
    }

    /// Returns `"Simple"` or `"Advanced"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EditorKind::Simple => "Simple",
            EditorKind::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for EditorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata decoded from the header of a map file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapInfo {
    // Summary chunk
    /// Unique identifier of the map.
    pub uid: String,

    /// Map name, styling codes included.
    pub name: String,

    /// Login of the map author.
    pub author_login: String,

    /// Title pack the map was made for.
    pub title_id: String,

    /// Environment (collection) name.
    pub environment: String,

    /// Lighting mood (day, night, ...).
    pub mood: String,

    /// Decoration environment identifier.
    pub decoration_environment_id: String,

    /// Decoration environment author.
    pub decoration_environment_author: String,

    /// Map type script name.
    pub map_type: String,

    /// Map style.
    pub map_style: String,

    // Base chunk
    /// Numeric map type identifier.
    pub map_type_id: u32,

    /// Whether the map is multilap.
    pub is_multilap: bool,

    /// Number of laps.
    pub laps: u32,

    /// Number of checkpoints.
    pub checkpoints: u32,

    /// Display cost of the map.
    pub price: u32,

    /// Editor mode, `None` when the base chunk is absent.
    pub editor: Option<EditorKind>,

    /// Author time in milliseconds.
    pub author_time: u32,

    /// Author score.
    pub author_score: u32,

    /// Gold medal time in milliseconds.
    pub gold_time: u32,

    /// Silver medal time in milliseconds.
    pub silver_time: u32,

    /// Bronze medal time in milliseconds.
    pub bronze_time: u32,

    // Author info chunk
    /// Editor version of the author.
    pub author_version: u32,

    /// Author nickname at the time the map was saved.
    pub author_nick_name: String,

    /// Author zone at the time the map was saved.
    pub author_zone: String,

    /// Extra author information.
    pub author_extra: String,

    // XML header chunk
    /// XML rendition of the header.
    pub header_xml: String,

    // Thumbnail chunk
    /// Whether the map carries a thumbnail.
    pub has_thumbnail: bool,

    /// Raw JPEG thumbnail bytes, empty without a thumbnail.
    pub thumbnail: Vec<u8>,

    /// Map comments.
    pub comments: String,
}

impl MapInfo {
    /// Returns the thumbnail bytes, if the map has a thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&[u8]> {
        if self.has_thumbnail {
            Some(&self.thumbnail)
        } else {
            None
        }
    }

    /// Returns the medal times as (bronze, silver, gold, author).
    #[must_use]
    pub fn medal_times(&self) -> (u32, u32, u32, u32) {
        (
            self.bronze_time,
            self.silver_time,
            self.gold_time,
            self.author_time,
        )
    }
}

/// Formats a race time in milliseconds as `M:SS.mmm`.
///
/// Times of an hour or more are shown as `H:MM:SS.mmm`. The all-ones value
/// the game uses for "no time" is shown as `-:--.---`.
///
/// # Example
///
/// ```
/// use gbx_map_parser::map::format_race_time;
///
/// assert_eq!(format_race_time(45_123), "0:45.123");
/// assert_eq!(format_race_time(3_723_004), "1:02:03.004");
/// ```
#[must_use]
pub fn format_race_time(time_ms: u32) -> String {
    if time_ms == u32::MAX {
        return "-:--.---".to_string();
    }

    let ms = time_ms % 1000;
    let total_seconds = time_ms / 1000;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{ms:03}")
    } else {
        format!("{minutes}:{seconds:02}.{ms:03}")
    }
}
