mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use textscout::{search, CliOverrides, EncodingMode, FailurePolicy, SearchConfig};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::output::{print_report, OutputFormat};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "List files in a directory containing a text. Searches files with the given extensions (e.g. txt, csv)",
    long_about = None
)]
struct Cli {
    /// Path to the directory where search will be performed
    #[arg(short = 'd', long, value_name = "/path/to/directory")]
    directory: Option<PathBuf>,

    /// Text to be searched. It could be a char, word or sentence
    #[arg(short = 't', long, value_name = "Text to be searched")]
    text: Option<String>,

    /// File extensions to be searched (e.g. -e txt csv or -e txt,csv)
    #[arg(short = 'e', long, num_args = 1.., value_delimiter = ',')]
    extensions: Vec<String>,

    /// Patterns to ignore (glob format)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy)
    #[arg(long)]
    encoding: Option<String>,

    /// Fail the whole run if any file cannot be read
    #[arg(long)]
    fail_fast: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (text|json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} There was an error during application running:\n{}",
                "error:".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Installed before the config files load so their debug lines show up
    let log_filter = init_tracing(cli.log_level.as_deref().unwrap_or("warn"));

    let file_config = SearchConfig::load_from(cli.config.as_deref())?;

    let overrides = CliOverrides {
        root_path: cli.directory,
        search_text: cli.text,
        file_extensions: cli.extensions,
        ignore_patterns: cli.ignore,
        thread_count: cli.threads,
        log_level: cli.log_level,
        encoding_mode: cli.encoding.as_deref().map(parse_encoding_mode),
        failure_policy: cli.fail_fast.then_some(FailurePolicy::FailFast),
    };
    let config = file_config.merge_with_cli(overrides);

    log_filter.reload(env_filter(&config.log_level))?;
    debug!("Effective configuration: {:?}", config);

    let report = search(&config)?;
    print_report(&report, OutputFormat::parse(&cli.format))?;
    Ok(())
}

fn parse_encoding_mode(value: &str) -> EncodingMode {
    match value.to_lowercase().as_str() {
        "lossy" => EncodingMode::Lossy,
        _ => EncodingMode::FailFast,
    }
}

/// `RUST_LOG` wins over the configured level
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Logs go to stderr. The returned handle swaps the filter once the
/// configuration files are merged.
fn init_tracing(log_level: &str) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(env_filter(log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
    handle
}
