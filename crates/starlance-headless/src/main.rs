//! Headless STARLANCE runner.
//!
//! Starts a scene, hands the ship to the autopilot and runs the engine for a
//! fixed span of simulated frames. Useful for soak runs and for collecting
//! flight telemetry without a renderer.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p starlance-headless -- --seconds 120 --seed 42 --boss 0
//! cargo run -p starlance-headless -- --tuning tuning.json --telemetry-dir out/
//! ```
//!
//! Logs go to stderr; the final snapshot is printed to stdout as JSON.

mod host;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starlance_core::commands::PlayerCommand;
use starlance_core::events::SimEvent;
use starlance_core::tuning::Tuning;
use starlance_sim::services::Services;
use starlance_sim::{SimConfig, SimulationEngine};

use host::{CsvTelemetryStore, LogShake, LogStatus};

#[derive(Parser)]
#[command(name = "starlance-headless")]
#[command(about = "Headless STARLANCE runner for autopilot soak runs")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Simulated seconds to run
    #[arg(short, long, default_value = "60")]
    seconds: f64,

    /// Host frame rate driving the engine
    #[arg(long, default_value = "60")]
    fps: u32,

    /// RNG seed (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning overrides
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Spawn the boss at this roster index once the scene starts
    #[arg(long)]
    boss: Option<usize>,

    /// Directory for telemetry CSV files
    #[arg(long, default_value = "telemetry")]
    telemetry_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::with_default_bosses(),
    };
    let services = Services::default()
        .with_status(LogStatus)
        .with_shake(LogShake)
        .with_telemetry_store(CsvTelemetryStore::new(&cli.telemetry_dir));
    let mut engine = SimulationEngine::try_new(SimConfig {
        seed: cli.seed,
        tuning,
    })?
    .with_services(services);

    engine.queue_commands([PlayerCommand::StartScene, PlayerCommand::ToggleAutopilot]);
    if let Some(index) = cli.boss {
        engine.queue_command(PlayerCommand::SpawnBoss { index });
    }

    let fps = cli.fps.max(1);
    let frame_dt = 1.0 / fps as f64;
    let frames = (cli.seconds.max(0.0) * fps as f64).round() as u64;
    let (mut kills, mut deaths, mut barrages) = (0u32, 0u32, 0u32);

    for _ in 0..frames {
        let snapshot = engine.frame(frame_dt);
        for event in &snapshot.events {
            match event {
                SimEvent::EnemyDestroyed { .. } => kills += 1,
                SimEvent::PlayerHidden => deaths += 1,
                SimEvent::MissileBarrage { .. } => barrages += 1,
                _ => {}
            }
        }
    }

    info!(
        ticks = engine.time().tick,
        kills, deaths, barrages, "run finished"
    );

    engine.queue_command(PlayerCommand::SaveTelemetry);
    let snapshot = engine.frame(0.0);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
