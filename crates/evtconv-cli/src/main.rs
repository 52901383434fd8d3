use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;

use evtconv_core::{
    ConversionSummary, ConvertConfig, DEFAULT_BUILD_LABEL, DEFAULT_CHUNK_SIZE, JsonlSink,
    LabeledEventFile, convert_evt_file, convert_labeled_events, make_stub_summary,
};

#[derive(Parser, Debug)]
#[command(name = "evtconv")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("EVTCONV_BUILD_COMMIT"), " ", env!("EVTCONV_BUILD_DATE"), ")\n",
    "commit: ", env!("EVTCONV_BUILD_COMMIT_FULL")
))]
#[command(
    about = "Offline converter for detector-hit captures (ring-item .evt / labeled FASTER events).",
    long_about = None,
    after_help = "Examples:\n  evtconv evt convert run-0001-00.evt -o run1\n  evtconv evt convert 'run-0001-*.evt' -o run1 --summary run1.summary.json\n  evtconv faster convert events.jsonl -o run2 --build-label 3000"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on ring-item (.evt) captures.
    Evt {
        #[command(subcommand)]
        command: EvtCommands,
    },
    /// Operations on pre-parsed labeled event streams.
    Faster {
        #[command(subcommand)]
        command: FasterCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EvtCommands {
    /// Convert one or more run segments into JSON-lines hit/trace files.
    #[command(
        after_help = "Examples:\n  evtconv evt convert run-0001-00.evt -o run1\n  evtconv evt convert 'run-0001-*.evt' -o run1 --stdout"
    )]
    Convert {
        /// Path or glob pattern matching .evt run segments
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Hits buffered before each flush
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

#[derive(Subcommand, Debug)]
enum FasterCommands {
    /// Convert a JSON-lines labeled event stream into hit/trace files.
    Convert {
        /// Path to a labeled-event .jsonl file
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Hits buffered before each flush
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Label marking built (aggregate) events
        #[arg(long, default_value_t = DEFAULT_BUILD_LABEL)]
        build_label: u16,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output base path; writes <base>.hits.jsonl and <base>.traces.jsonl
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Write the conversion summary JSON to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Write the conversion summary JSON to stdout
    #[arg(long, conflicts_with = "summary")]
    stdout: bool,

    /// Pretty-print JSON summary output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON summary output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evt { command } => match command {
            EvtCommands::Convert {
                input,
                output,
                chunk_size,
            } => cmd_evt_convert(input, output, chunk_size),
        },
        Commands::Faster { command } => match command {
            FasterCommands::Convert {
                input,
                output,
                chunk_size,
                build_label,
            } => cmd_faster_convert(input, output, chunk_size, build_label),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_evt_convert(
    input: PathBuf,
    output: OutputArgs,
    chunk_size: usize,
) -> Result<(), CliError> {
    let segments = resolve_input_paths(&input)?;
    for segment in &segments {
        validate_evt_file(segment)?;
    }

    let config = ConvertConfig {
        chunk_size,
        ..ConvertConfig::default()
    };
    let (hits_path, traces_path) = output_paths(&output.output);
    let mut sink = JsonlSink::create(&hits_path, &traces_path)
        .with_context(|| format!("Failed to create output files at {}", output.output.display()))
        .map_err(CliError::from)?;

    let mut merged = make_stub_summary(&input.display().to_string(), 0);
    for segment in &segments {
        let summary = convert_evt_file(segment, &mut sink, &config)
            .with_context(|| format!("Conversion failed for {}", segment.display()))
            .map_err(CliError::from)?;
        merge_summary(&mut merged, &summary);
    }

    emit_summary(&merged, &output, &hits_path)
}

fn cmd_faster_convert(
    input: PathBuf,
    output: OutputArgs,
    chunk_size: usize,
    build_label: u16,
) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a labeled-event .jsonl file".to_string()),
        ));
    }

    let events = LabeledEventFile::open(&input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))
        .map_err(CliError::from)?;
    let bytes = fs::metadata(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
        .map_err(CliError::from)?
        .len();

    let config = ConvertConfig {
        chunk_size,
        build_label,
    };
    let (hits_path, traces_path) = output_paths(&output.output);
    let mut sink = JsonlSink::create(&hits_path, &traces_path)
        .with_context(|| format!("Failed to create output files at {}", output.output.display()))
        .map_err(CliError::from)?;

    let summary = convert_labeled_events(
        &input.display().to_string(),
        bytes,
        events,
        &mut sink,
        &config,
    )
    .with_context(|| format!("Conversion failed for {}", input.display()))
    .map_err(CliError::from)?;

    emit_summary(&summary, &output, &hits_path)
}

fn output_paths(base: &PathBuf) -> (PathBuf, PathBuf) {
    let mut hits = base.as_os_str().to_os_string();
    hits.push(".hits.jsonl");
    let mut traces = base.as_os_str().to_os_string();
    traces.push(".traces.jsonl");
    (PathBuf::from(hits), PathBuf::from(traces))
}

fn merge_summary(merged: &mut ConversionSummary, segment: &ConversionSummary) {
    merged.input.bytes += segment.input.bytes;
    merged.items_total += segment.items_total;
    merged.physics_items += segment.physics_items;
    merged.skipped_items += segment.skipped_items;
    merged.hits_total += segment.hits_total;
    merged.traces_total += segment.traces_total;
    merged.flushes += segment.flushes;
    merged.generated_at = segment.generated_at.clone();
}

fn emit_summary(
    summary: &ConversionSummary,
    output: &OutputArgs,
    hits_path: &PathBuf,
) -> Result<(), CliError> {
    let json = serialize_summary(summary, output.pretty, output.compact)?;

    if output.stdout {
        print!("{}", json);
    } else if let Some(summary_path) = output.summary.as_ref() {
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })
                    .map_err(CliError::from)?;
            }
        }
        fs::write(summary_path, json)
            .with_context(|| format!("Failed to write summary: {}", summary_path.display()))
            .map_err(CliError::from)?;
    }

    if !output.quiet {
        eprintln!(
            "OK: {} hits ({} traces) written -> {}",
            summary.hits_total,
            summary.traces_total,
            hits_path.display()
        );
    }
    Ok(())
}

fn serialize_summary(
    summary: &ConversionSummary,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_evt_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a ring-item .evt capture".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a ring-item .evt capture".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "evt" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .evt capture".to_string()),
        ));
    }
    Ok(())
}

/// Resolve a path or glob pattern into a sorted list of run segments.
///
/// Run captures are split into numbered segments; converting them in
/// lexical order reproduces the original acquisition order.
fn resolve_input_paths(input: &PathBuf) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(vec![input.clone()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .evt segments".to_string()),
        ));
    }

    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
