//! Headless Final Path runner.
//!
//! Plays the simulation with the seeded auto-player and logs the outcome.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use final_path_app::runner::{load_config, report, run_fast, run_realtime};

#[derive(Parser, Debug)]
#[command(name = "final-path")]
#[command(about = "Run the Final Path simulation with a scripted player")]
struct Args {
    /// Maximum number of ticks to simulate
    #[arg(long, default_value = "36000")]
    ticks: u64,

    /// Seed for the scripted player
    #[arg(long, default_value = "42")]
    seed: u64,

    /// JSON file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run on the game loop thread at the configured tick rate
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    info!(seed = args.seed, ticks = args.ticks, realtime = args.realtime, "starting run");

    if args.realtime {
        if let Some(snapshot) = run_realtime(config, args.seed, args.ticks)? {
            report(&snapshot);
        }
    } else {
        report(&run_fast(config, args.seed, args.ticks)?);
    }
    Ok(())
}
