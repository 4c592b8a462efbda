mod api;
mod cli;
mod config;
mod timer;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use cli::commands::run_cli;
use cli::opts::{Cli, Command};

fn main() -> Result<()> {
    let args = Cli::parse();

    // The server logs requests; CLI commands stay quiet unless RUST_LOG says otherwise.
    let default_filter = match args.cmd {
        Command::Serve(_) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = Runtime::new()?;
    rt.block_on(run_cli(args))
}
