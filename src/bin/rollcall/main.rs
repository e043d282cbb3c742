mod commands;
mod shell;

use std::{io, path::PathBuf};

use clap::Parser;
use rollcall::{app::AppState, config::Config, models::Database};
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;

/// Register events and confirm attendance from the terminal.
#[derive(Debug, Parser)]
#[command(name = "rollcall", version)]
struct Args {
    /// Data file to load at startup and save on exit [env: ROLLCALL_DATA_FILE]
    #[arg(long, short = 'f')]
    data_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set.
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the menu on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = Config::from_env();
    if let Some(path) = args.data_file {
        config.data_file = path;
    }
    tracing::debug!(data_file = %config.data_file.display(), "starting");

    let state = AppState::load(Database::new(&config.data_file));
    Shell::new(state, io::stdin().lock(), io::stdout()).run()?;
    Ok(())
}
