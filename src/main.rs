//! Console entry point.

use std::io;

use anyhow::Result;
use clap::Parser;
use snakes_ladders::cli::{self, AppConfig, Cli, Prompter};
use snakes_ladders::error::{Error, InputError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging();

    let config = AppConfig::from_env().with_cli(cli);
    tracing::debug!(?config, "starting");

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match cli::run(&config, &mut prompter) {
        Ok(()) => Ok(()),
        Err(Error::Input(InputError::Eof)) => {
            tracing::info!("input closed, leaving the game");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Logs go to stderr so prompts on stdout stay readable.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
