//! Event Tempo CLI - interarrival analysis over a persisted event log.
//!
//! The binary is a thin shell around [`tempo_core::run_analysis`]: it
//! resolves configuration (CLI flags over environment over defaults),
//! opens the event store, runs the batch pipeline once, and renders the
//! report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tempo_common::{Error, ErrorCategory, OutputFormat};
use tempo_config::{Config, MinSampleMode};
use tempo_core::{output, run_analysis};
use tempo_store::JsonlEventStore;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Event Tempo - fit probability models to event interarrival times
#[derive(Parser)]
#[command(name = "tempo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze interarrival times and fit the distribution catalog
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the JSONL event log
    #[arg(long, env = "TEMPO_EVENT_LOG")]
    store: Option<PathBuf>,

    /// Restrict the analysis to one topic (default: all stored events)
    #[arg(long)]
    topic: Option<String>,

    /// Minimum interarrival observations for a meaningful fit
    #[arg(long)]
    min_samples: Option<usize>,

    /// Abort instead of warning when the sample is below the minimum
    #[arg(long)]
    strict: bool,

    /// Histogram bin count floor for the Freedman-Diaconis rule
    #[arg(long)]
    min_bins: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(category = %e.category(), "{e}");
            ExitCode::from(exit_code(e.category()))
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let Commands::Analyze(args) = &cli.command;

    let mut cfg = Config::from_env().map_err(|e| Error::Config {
        reason: e.to_string(),
    })?;
    if let Some(store) = &args.store {
        cfg.analysis.event_log = store.clone();
    }
    if let Some(min) = args.min_samples {
        cfg.analysis.min_sample_size = min;
    }
    if args.strict {
        cfg.analysis.min_sample_mode = MinSampleMode::Fail;
    }
    if let Some(bins) = args.min_bins {
        cfg.analysis.min_bins = bins;
    }
    cfg.validate().map_err(|e| Error::Config {
        reason: e.to_string(),
    })?;

    let store = JsonlEventStore::new(cfg.analysis.event_log.clone());
    let report = run_analysis(&store, &cfg, args.topic.as_deref())?;

    println!("{}", output::render(&report, cli.global.format)?);
    Ok(())
}

fn init_tracing(global: &GlobalOpts) {
    let default = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(category: ErrorCategory) -> u8 {
    match category {
        ErrorCategory::Config => 2,
        ErrorCategory::Store => 3,
        ErrorCategory::Data => 4,
        ErrorCategory::Fit => 5,
        ErrorCategory::Io => 6,
    }
}
