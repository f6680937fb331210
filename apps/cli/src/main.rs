//! PortfolioBuilder CLI: headless portfolio building and publishing.
//!
//! Replays a profile file through the builder wizard, previews the result,
//! and runs the publish pipeline against a download or hosting target.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
