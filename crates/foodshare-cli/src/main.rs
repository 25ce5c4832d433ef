//! # foodshare CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use foodshare_cli::inspect::{run_gates, run_graph, GatesArgs, GraphArgs};
use foodshare_cli::replay::{run_replay, ReplayArgs};
use foodshare_service::ServiceConfig;

/// FoodShare donation lifecycle tool.
#[derive(Parser, Debug)]
#[command(name = "foodshare", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Falls back to FOODSHARE_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the lifecycle graph and the roles permitted on each edge.
    Graph(GraphArgs),

    /// Evaluate payment and tracking gates for a status and role.
    Gates(GatesArgs),

    /// Replay a YAML scenario and print one JSON line per step.
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ServiceConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    // -v flags take precedence over RUST_LOG, which takes precedence over
    // the configured filter.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "foodshare CLI starting");

    let result = match cli.command {
        Commands::Graph(args) => run_graph(&args),
        Commands::Gates(args) => run_gates(&args),
        Commands::Replay(args) => run_replay(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
