//! Terminal Simon (default binary).
//!
//! Configuration comes from `SIMON_*` environment variables. Logs go to
//! `SIMON_LOG_PATH` when set; the terminal itself belongs to the game.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use simon::core::GameConfig;
use simon::runtime::{run_session, HostConfig};
use simon::term::TerminalRenderer;

fn main() -> Result<()> {
    let game = GameConfig::from_env().context("invalid game configuration")?;
    let host = HostConfig::from_env().context("invalid host configuration")?;

    if let Some(path) = &host.log_path {
        init_logging(path, &host.log_filter)?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run_session(game, &host, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();

    let outcome = result?;
    if let Some(line) = outcome.summary() {
        println!("{line}");
    }
    Ok(())
}

fn init_logging(path: &Path, filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {:?}", filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}
