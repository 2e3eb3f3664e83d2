#![forbid(unsafe_code)]

mod board;
mod color;
mod config;
mod constants;
mod export;
mod gui;
mod image;
mod input;
mod jobs;
mod scene;
mod snapshots;
mod storage;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::AppConfig;
use constants::config::ENV_LOG_LEVEL;
use export::Rasterizer;
use input::InputMode;
use jobs::JobRunner;

#[derive(Parser)]
#[command(name = "roster-board", version, about = "Roster board editor for esports line-ups")]
struct Args {
    /// Config file (default: <config dir>/roster-board/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for saved rosters
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory exported PNGs are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long, value_enum)]
    input_mode: Option<InputMode>,
}

fn parse_level(name: &str) -> TraceLevel {
    match name.trim().to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

/// `log_level` from the config file, read before logging is up
fn configured_log_level(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let table: toml::Table = toml::from_str(&contents).ok()?;
    table.get("log_level")?.as_str().map(str::to_string)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);

    let log_level = args
        .log_level
        .clone()
        .or_else(|| std::env::var(ENV_LOG_LEVEL).ok())
        .or_else(|| configured_log_level(&config_path))
        .unwrap_or_else(|| "info".to_string());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&log_level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let mut config = AppConfig::load_from(&config_path)?;
    config.apply_env_overrides();
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(dir) = args.data_dir {
        config.storage.directory = Some(dir);
    }
    if let Some(dir) = args.export_dir {
        config.export.directory = Some(dir);
    }
    if let Some(mode) = args.input_mode {
        config.input_mode = mode;
    }
    config.validate_and_clamp();

    info!(
        config = %config_path.display(),
        log_level = %config.log_level,
        starters = config.board.starters,
        reserves = config.board.reserves,
        "Starting roster board"
    );

    let jobs = JobRunner::new(Arc::new(Rasterizer::new(&config.export.font)))?;
    gui::run_gui(config, jobs)
}
