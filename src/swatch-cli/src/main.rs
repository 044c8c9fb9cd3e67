//! Swatch - replays scripted input against a headless color picker.
//!
//! Prints one JSON object per line for every color change, dialog
//! open/close, debounced reposition and requested view snapshot.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use swatch_picker::PickerConfig;

mod replay;
mod script;

use replay::Replayer;
use script::Script;

/// Swatch color picker replay
#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Replay scripted pointer and keyboard input against a color picker")]
#[command(version)]
struct Args {
    /// Picker configuration file (TOML)
    #[arg(short, long, env = "SWATCH_CONFIG")]
    config: Option<String>,

    /// Replay script (TOML)
    #[arg(short, long)]
    script: String,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the replay output.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&str>) -> Result<PickerConfig> {
    let Some(path) = path else {
        return PickerConfig::from_env().context("Invalid configuration in environment");
    };
    let mut config = PickerConfig::load(path)
        .with_context(|| format!("Failed to load config from {path}"))?;
    config
        .apply_env()
        .context("Invalid configuration in environment")?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let script = Script::load(&args.script)?;
    info!(
        steps = script.steps.len(),
        dialog_width = config.dialog_width,
        dialog_height = config.dialog_height,
        "starting replay"
    );

    let mut replayer = Replayer::new(&config, script.layout)?;
    let events = replayer.run(&script);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for event in &events {
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(
        events = events.len(),
        color = %replayer.picker().color(),
        listeners = replayer.picker().host().listener_count(),
        "replay finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level, args.json_logs);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
