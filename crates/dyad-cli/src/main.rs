//! # dyad CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dyad_cli::combine::{run_combine, run_scale, CombineArgs, ScaleArgs};
use dyad_cli::metrics::{run_metric, MetricArgs};
use dyad_cli::show::{run_show, ShowArgs};
use dyad_cli::OutputFormat;

/// Dyadic tensor toolkit.
///
/// Builds second-order tensors from components or eigenvectors, prints their
/// eigen-decomposition, combines them, and evaluates anisotropy metrics.
#[derive(Parser, Debug)]
#[command(name = "dyad", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a tensor's text form, components and (optionally) eigens.
    Show(ShowArgs),

    /// Add, subtract, multiply entry-wise, or contract two tensors.
    Combine(CombineArgs),

    /// Multiply every component by a scalar.
    Scale(ScaleArgs),

    /// Evaluate named scalar metrics.
    Metric(MetricArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dyad CLI starting");

    let result = match &cli.command {
        Commands::Show(args) => run_show(args, cli.format),
        Commands::Combine(args) => run_combine(args, cli.format),
        Commands::Scale(args) => run_scale(args, cli.format),
        Commands::Metric(args) => run_metric(args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
