//! GBX map header parser CLI
//!
//! A command-line interface for inspecting ManiaPlanet / TrackMania map
//! files.
//!
//! ## Commands
//!
//! - `info` - Display a quick map summary
//! - `parse` - Dump every decoded field, as JSON or plain text
//! - `chunks` - List the header chunk table
//! - `validate` - Check that a map header decodes (exit codes for scripting)
//! - `batch` - Process every map in a directory
//!
//! Diagnostics go to stderr and are controlled with `RUST_LOG`.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use gbx_map_parser::map::format_race_time;
use gbx_map_parser::{read_chunk_table, read_file, MapInfo, ParserError};

/// GBX map header parser
#[derive(Parser)]
#[command(name = "gbx-map-parser")]
#[command(about = "ManiaPlanet / TrackMania map (.Map.Gbx) header parser", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display map information
    Info {
        /// Path to the map file
        file: PathBuf,
    },
    /// Parse a map file
    Parse {
        /// Path to the map file
        file: PathBuf,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
        /// Include the XML header
        #[arg(long)]
        xml: bool,
        /// Write the raw thumbnail bytes to this path
        #[arg(long)]
        thumbnail: Option<PathBuf>,
    },
    /// List the header chunk table
    Chunks {
        /// Path to the map file
        file: PathBuf,
    },
    /// Validate a map header
    Validate {
        /// Path to the map file
        file: PathBuf,
        /// Verbose error reporting
        #[arg(short, long)]
        verbose: bool,
    },
    /// Parse multiple map files
    Batch {
        /// Directory containing map files
        directory: PathBuf,
        /// Output directory for JSON files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Generate summary report
        #[arg(long)]
        summary: bool,
        /// Continue on errors
        #[arg(long)]
        continue_on_error: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

// ============================================================================
// Serializable Output Structures
// ============================================================================

#[derive(Serialize)]
struct MapOutput {
    uid: String,
    name: String,
    map_type: String,
    map_style: String,
    map_type_id: u32,
    title_id: String,
    environment: String,
    mood: String,
    decoration: DecorationInfo,
    author: AuthorInfo,
    times: TimesInfo,
    is_multilap: bool,
    laps: u32,
    checkpoints: u32,
    price: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_size: Option<usize>,
    comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_xml: Option<String>,
}

#[derive(Serialize)]
struct DecorationInfo {
    id: String,
    author: String,
}

#[derive(Serialize)]
struct AuthorInfo {
    login: String,
    nickname: String,
    zone: String,
    extra: String,
    version: u32,
    score: u32,
}

#[derive(Serialize)]
struct TimesInfo {
    bronze_ms: u32,
    silver_ms: u32,
    gold_ms: u32,
    author_ms: u32,
}

#[derive(Serialize)]
struct BatchSummary {
    total_files: usize,
    successful: usize,
    failed: usize,
    with_thumbnail: usize,
    environment_distribution: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_author_time_ms: Option<u32>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Parse {
            file,
            output,
            xml,
            thumbnail,
        } => cmd_parse(&file, &output, xml, thumbnail.as_deref()),
        Commands::Chunks { file } => cmd_chunks(&file),
        Commands::Validate { file, verbose } => cmd_validate(&file, verbose),
        Commands::Batch {
            directory,
            output,
            summary,
            continue_on_error,
        } => cmd_batch(&directory, output.as_deref(), summary, continue_on_error),
    }
}

fn parse_timed(file: &Path) -> Result<(MapInfo, Duration), ParserError> {
    let start = Instant::now();
    let map = read_file(file)?;
    Ok((map, start.elapsed()))
}

// ============================================================================
// Info Command Implementation
// ============================================================================

fn cmd_info(file: &Path) -> ExitCode {
    let (map, elapsed) = match parse_timed(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing map: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_info(&map, elapsed);

    ExitCode::SUCCESS
}

fn print_info(map: &MapInfo, elapsed: Duration) {
    println!("=== Map Information ===\n");

    println!("Map:");
    println!("  Name: {}", map.name);
    println!("  UId: {}", map.uid);
    println!("  Environment: {}", map.environment);
    println!("  Mood: {}", map.mood);
    println!("  Type: {}", map.map_type);
    if !map.map_style.is_empty() {
        println!("  Style: {}", map.map_style);
    }
    println!("  Title: {}", map.title_id);

    println!();

    println!("Author:");
    println!("  Login: {}", map.author_login);
    println!("  Nickname: {}", map.author_nick_name);
    println!("  Zone: {}", map.author_zone);

    println!();

    println!("Times:");
    println!("  Author: {}", format_race_time(map.author_time));
    println!("  Gold:   {}", format_race_time(map.gold_time));
    println!("  Silver: {}", format_race_time(map.silver_time));
    println!("  Bronze: {}", format_race_time(map.bronze_time));

    println!();

    println!("Track:");
    println!("  Checkpoints: {}", map.checkpoints);
    if map.is_multilap {
        println!("  Laps: {}", map.laps);
    }
    println!("  Price: {}", map.price);
    if let Some(editor) = map.editor {
        println!("  Editor: {}", editor);
    }
    match map.thumbnail() {
        Some(jpeg) => println!("  Thumbnail: {} bytes", jpeg.len()),
        None => println!("  Thumbnail: none"),
    }

    println!();
    println!("Parsed in {:.2} ms", elapsed.as_secs_f64() * 1000.0);
}

// ============================================================================
// Parse Command Implementation
// ============================================================================

fn cmd_parse(
    file: &Path,
    output: &OutputFormat,
    include_xml: bool,
    thumbnail_path: Option<&Path>,
) -> ExitCode {
    let map = match read_file(file) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = thumbnail_path {
        match map.thumbnail() {
            Some(jpeg) => {
                if let Err(e) = std::fs::write(path, jpeg) {
                    eprintln!("Error writing thumbnail: {}", e);
                    return ExitCode::FAILURE;
                }
                eprintln!("Thumbnail written to: {}", path.display());
            }
            None => eprintln!("Map has no thumbnail"),
        }
    }

    let output_data = build_output(&map, include_xml);

    match output {
        OutputFormat::Json => print_json(&output_data),
        OutputFormat::Pretty => print_pretty(&output_data),
    }

    ExitCode::SUCCESS
}

fn build_output(map: &MapInfo, include_xml: bool) -> MapOutput {
    MapOutput {
        uid: map.uid.clone(),
        name: map.name.clone(),
        map_type: map.map_type.clone(),
        map_style: map.map_style.clone(),
        map_type_id: map.map_type_id,
        title_id: map.title_id.clone(),
        environment: map.environment.clone(),
        mood: map.mood.clone(),
        decoration: DecorationInfo {
            id: map.decoration_environment_id.clone(),
            author: map.decoration_environment_author.clone(),
        },
        author: AuthorInfo {
            login: map.author_login.clone(),
            nickname: map.author_nick_name.clone(),
            zone: map.author_zone.clone(),
            extra: map.author_extra.clone(),
            version: map.author_version,
            score: map.author_score,
        },
        times: TimesInfo {
            bronze_ms: map.bronze_time,
            silver_ms: map.silver_time,
            gold_ms: map.gold_time,
            author_ms: map.author_time,
        },
        is_multilap: map.is_multilap,
        laps: map.laps,
        checkpoints: map.checkpoints,
        price: map.price,
        editor: map.editor.map(|e| e.to_string()),
        thumbnail_size: map.thumbnail().map(<[u8]>::len),
        comments: map.comments.clone(),
        header_xml: include_xml.then(|| map.header_xml.clone()),
    }
}

fn print_json(output: &MapOutput) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

fn print_pretty(output: &MapOutput) {
    println!("=== Map ===");
    println!("UId: {}", output.uid);
    println!("Name: {}", output.name);
    println!("Map Type: {} ({})", output.map_type, output.map_type_id);
    println!("Map Style: {}", output.map_style);
    println!("Title: {}", output.title_id);
    println!("Environment: {}", output.environment);
    println!("Mood: {}", output.mood);
    println!(
        "Decoration: {} by {}",
        output.decoration.id, output.decoration.author
    );
    println!();

    println!("=== Author ===");
    println!("Login: {}", output.author.login);
    println!("Nickname: {}", output.author.nickname);
    println!("Zone: {}", output.author.zone);
    if !output.author.extra.is_empty() {
        println!("Extra: {}", output.author.extra);
    }
    println!("Version: {}", output.author.version);
    println!("Score: {}", output.author.score);
    println!();

    println!("=== Times ===");
    println!("Bronze: {}", format_race_time(output.times.bronze_ms));
    println!("Silver: {}", format_race_time(output.times.silver_ms));
    println!("Gold: {}", format_race_time(output.times.gold_ms));
    println!("Author: {}", format_race_time(output.times.author_ms));
    println!();

    println!("=== Track ===");
    println!("Multilap: {}", output.is_multilap);
    println!("Laps: {}", output.laps);
    println!("Checkpoints: {}", output.checkpoints);
    println!("Price: {}", output.price);
    if let Some(editor) = &output.editor {
        println!("Editor: {}", editor);
    }
    match output.thumbnail_size {
        Some(size) => println!("Thumbnail: {} bytes", size),
        None => println!("Thumbnail: none"),
    }
    if !output.comments.is_empty() {
        println!("\n=== Comments ===");
        println!("{}", output.comments);
    }

    if let Some(xml) = &output.header_xml {
        println!("\n=== XML Header ===");
        println!("{}", xml);
    }
}

// ============================================================================
// Chunks Command Implementation
// ============================================================================

fn cmd_chunks(file: &Path) -> ExitCode {
    let file_handle = match File::open(file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let table = match read_chunk_table(BufReader::new(file_handle)) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading chunk table: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=== Header Chunks ({}) ===", table.len());
    println!("Header length: {} bytes\n", table.header_length);
    println!("  {:<10}  {:<12}  {:>8}  Heavy", "Id", "Kind", "Size");
    for entry in table.iter() {
        let kind = entry.kind().map_or("-", |k| k.name());
        println!(
            "  0x{:08X}  {:<12}  {:>8}  {}",
            entry.id,
            kind,
            entry.size,
            if entry.heavy { "yes" } else { "" }
        );
    }

    ExitCode::SUCCESS
}

// ============================================================================
// Validate Command Implementation
// ============================================================================

fn cmd_validate(file: &Path, verbose: bool) -> ExitCode {
    let result = read_file(file);

    if verbose {
        print_validation_details(&result, file);
    } else {
        let status = if result.is_ok() { "VALID" } else { "INVALID" };
        println!("{}: {}", file.display(), status);
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_validation_details(result: &Result<MapInfo, ParserError>, file: &Path) {
    println!("Validating: {}\n", file.display());

    let (class_ok, header_ok) = match result {
        Ok(_) => (true, true),
        Err(ParserError::UnsupportedFormat { .. } | ParserError::IoError(_)) => (false, false),
        Err(_) => (true, false),
    };

    println!("Checks:");
    println!("  Class id:          {}", status_icon(class_ok));
    println!("  Header chunks:     {}", status_icon(header_ok));

    match result {
        Ok(map) => {
            if map.uid.is_empty() {
                println!("\nWarnings:");
                println!("  - No summary chunk (map UId missing)");
            }
        }
        Err(e) => {
            println!("\nErrors:");
            println!("  - {}", e);
            if e.is_truncated() {
                println!("  - File appears to be truncated");
            }
        }
    }

    println!(
        "\nResult: {}",
        if result.is_ok() { "VALID" } else { "INVALID" }
    );
}

fn status_icon(valid: bool) -> &'static str {
    if valid {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

// ============================================================================
// Batch Command Implementation
// ============================================================================

fn cmd_batch(
    directory: &Path,
    output_dir: Option<&Path>,
    summary: bool,
    continue_on_error: bool,
) -> ExitCode {
    let maps = find_maps(directory);

    if maps.is_empty() {
        eprintln!("No .gbx files found in {}", directory.display());
        return ExitCode::FAILURE;
    }

    eprintln!("Found {} map files", maps.len());

    if let Some(dir) = output_dir {
        if !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Failed to create output directory: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut error_count = 0;
    let mut results: Vec<MapInfo> = Vec::new();

    for path in &maps {
        eprint!(
            "Processing {}... ",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match process_map(path, output_dir) {
            Ok(map) => {
                eprintln!("OK");
                results.push(map);
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                error_count += 1;
                if !continue_on_error {
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    eprintln!(
        "\nProcessed: {} success, {} errors",
        results.len(),
        error_count
    );

    if summary {
        generate_summary(&results, error_count, output_dir);
    }

    ExitCode::SUCCESS
}

fn find_maps(directory: &Path) -> Vec<PathBuf> {
    let mut maps = Vec::new();

    if let Ok(entries) = std::fs::read_dir(directory) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("gbx"))
            {
                maps.push(path);
            }
        }
    }

    maps.sort();
    maps
}

fn process_map(path: &Path, output_dir: Option<&Path>) -> Result<MapInfo, String> {
    let map = read_file(path).map_err(|e| e.to_string())?;

    if let Some(dir) = output_dir {
        // "Name.Map.Gbx" -> "Name.Map.json"
        let output_file = dir
            .join(path.file_stem().unwrap_or_default())
            .with_extension("json");

        let content =
            serde_json::to_string_pretty(&build_output(&map, false)).map_err(|e| e.to_string())?;
        std::fs::write(&output_file, content).map_err(|e| e.to_string())?;
    }

    Ok(map)
}

fn generate_summary(results: &[MapInfo], failed: usize, output_dir: Option<&Path>) {
    let mut environments: HashMap<String, usize> = HashMap::new();
    for map in results {
        *environments.entry(map.environment.clone()).or_insert(0) += 1;
    }

    let author_times: Vec<u32> = results
        .iter()
        .map(|m| m.author_time)
        .filter(|&t| t > 0 && t != u32::MAX)
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    let average_author_time_ms = if author_times.is_empty() {
        None
    } else {
        Some(
            (author_times.iter().map(|&t| u64::from(t)).sum::<u64>()
                / author_times.len() as u64) as u32,
        )
    };

    let summary = BatchSummary {
        total_files: results.len() + failed,
        successful: results.len(),
        failed,
        with_thumbnail: results.iter().filter(|m| m.has_thumbnail).count(),
        environment_distribution: environments,
        average_author_time_ms,
    };

    println!("\n=== Batch Summary ===");
    println!("Files processed: {}", summary.total_files);
    println!("Successful: {}", summary.successful);
    println!("Failed: {}", summary.failed);
    println!("With thumbnail: {}", summary.with_thumbnail);

    println!("\nEnvironment distribution:");
    for (environment, count) in &summary.environment_distribution {
        println!("  {}: {}", environment, count);
    }

    if let Some(avg) = summary.average_author_time_ms {
        println!("\nAverage author time: {}", format_race_time(avg));
    }

    if let Some(dir) = output_dir {
        let summary_file = dir.join("summary.json");
        if let Ok(json) = serde_json::to_string_pretty(&summary) {
            if std::fs::write(&summary_file, json).is_ok() {
                println!("\nSummary written to: {}", summary_file.display());
            }
        }
    }
}
