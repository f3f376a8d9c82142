//! CLI entry point for snapdiff

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use snapdiff::{
    CompareConfig, DiffResult, MarkdownFormatter, OutputConfig, ReportFormatter,
    SnapshotComparator, UnmatchedPolicy, print_json, print_markdown,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status when the snapshots differ.
const EXIT_DIFFERENT: i32 = 1;
/// Exit status for invalid input or output failures.
const EXIT_TROUBLE: i32 = 2;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "snapdiff")]
#[command(about = "Compare two snapshot directories, with structured diffs for JSON files")]
#[command(version)]
struct Args {
    /// First (older) snapshot directory
    snapshot_a: PathBuf,

    /// Second (newer) snapshot directory
    snapshot_b: PathBuf,

    /// Include unchanged keys and indices in JSON object diffs
    #[arg(long = "show-all-objects")]
    show_all_objects: bool,

    /// Include identical text files with their full content
    #[arg(long = "show-all-files")]
    show_all_files: bool,

    /// Text-diff shared files whose extension has no comparison rule
    /// (by default they are silently skipped)
    #[arg(long = "diff-unrecognized")]
    diff_unrecognized: bool,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Skip content comparison of files larger than SIZE.
    /// Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Output in JSON format
    #[arg(long = "json", conflicts_with = "markdown")]
    json: bool,

    /// Output in Markdown format
    #[arg(long = "markdown", short = 'm', conflicts_with = "json")]
    markdown: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log progress and per-file decisions to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn render(args: &Args, result: &DiffResult) -> std::io::Result<()> {
    let output_config = OutputConfig {
        use_color: !args.markdown && should_use_color(args.color),
        ..Default::default()
    };

    if args.json {
        print_json(result)
    } else if args.markdown {
        print_markdown(&MarkdownFormatter::new(output_config), result)
    } else {
        ReportFormatter::new(output_config).print(result)
    }
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let max_file_size = args.max_file_size.as_ref().map(|size_str| {
        parse_file_size(size_str).unwrap_or_else(|e| {
            eprintln!("snapdiff: invalid --max-file-size '{}': {}", size_str, e);
            process::exit(EXIT_TROUBLE);
        })
    });

    let config = CompareConfig {
        show_all_objects: args.show_all_objects,
        show_all_files: args.show_all_files,
        unmatched: if args.diff_unrecognized {
            UnmatchedPolicy::TextDiff
        } else {
            UnmatchedPolicy::Skip
        },
        ignore_patterns: args.ignore.clone(),
        max_file_size,
    };

    let result = match SnapshotComparator::new(config).try_compare(&args.snapshot_a, &args.snapshot_b) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("snapdiff: {}", e);
            process::exit(EXIT_TROUBLE);
        }
    };

    if let Err(e) = render(&args, &result) {
        eprintln!("snapdiff: error writing output: {}", e);
        process::exit(EXIT_TROUBLE);
    }

    if !result.is_empty() {
        process::exit(EXIT_DIFFERENT);
    }
}
