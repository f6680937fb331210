//! PortfolioBuilder TUI: interactive terminal wizard with a live preview.
//!
//! Three tabs (Builder, Publish, Templates) built with `ratatui` + `crossterm`.
//! Logs go to `tui.log` in the config directory so they never tear the screen.

mod app;
mod screens;
mod widgets;

use std::fs::{self, File};
use std::sync::{Arc, Mutex};

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use portfoliobuilder_shared::{Catalogs, config_dir, load_config, validate_config};

fn main() -> Result<()> {
    color_eyre::install()?;
    init_file_logging()?;

    let catalogs = Arc::new(Catalogs::builtin());
    let config = load_config()?;
    validate_config(&config, &catalogs)?;

    // The publish pipeline spawns onto this runtime from the event loop.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let session = app::Session::new(catalogs, config)?;
    app::run(session)
}

fn init_file_logging() -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let file = File::create(dir.join("tui.log"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("portfoliobuilder=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
