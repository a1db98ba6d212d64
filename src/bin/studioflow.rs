//! Command-line client for the design-studio task workflow.
//!
//! Usage:
//!
//! ```text
//! studioflow tasks list
//! studioflow tasks show <id>
//! studioflow tasks rework <id> --remarks "Use the brand palette" --due 2026-05-01
//! ```
//!
//! Configuration is read from `.env`, `studioflow.toml`, the user config
//! directory and `STUDIOFLOW_*` environment variables; see
//! [`studioflow::config`].

#[path = "studioflow/cli.rs"]
mod cli;
#[path = "studioflow/commands.rs"]
mod commands;
#[path = "studioflow/render.rs"]
mod render;


use clap::Parser;
use eyre::{Result, WrapErr};
use studioflow::{config::ClientConfig, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let mut config = ClientConfig::load_with_dotenv().wrap_err("failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(filter) = cli.log {
        config.log.filter = filter;
    }
    telemetry::init(&config.log.filter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, config, &mut out).await
}
