mod analyzer;
mod cli;
mod error;
mod models;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting RunLens - Test-Run Flakiness Analyzer");
    cli.execute().await?;

    Ok(())
}
