#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Polygon Survivor session.

mod autopilot;
mod report;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use polygon_survivor_core::Tuning;
use polygon_survivor_session::Session;
use tracing::info;

use crate::autopilot::Autopilot;

/// Command-line arguments for the headless runner.
#[derive(Debug, Parser)]
#[command(name = "polygon-survivor", about = "Runs a headless Polygon Survivor session")]
struct CliArgs {
    /// Session seconds to simulate before stopping.
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Seed shared by every random stream of the session.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// TOML file overriding individual tuning values.
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Simulation steps per second of session time.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Polygon Survivor command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    let session = Session::new(tuning, args.seed).context("tuning rejected")?;

    info!(seconds = args.seconds, seed = args.seed, fps = args.fps, "autopilot run");
    let mut autopilot = Autopilot::new(session);
    let report = autopilot.run(args.seconds, args.fps.max(1), args.seed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("failed to parse tuning file {}", path.display()))
}
