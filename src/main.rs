//! stylewatch CLI - dependency-aware stylesheet watcher
//!
//! Usage: stylewatch [OPTIONS] [PATHS]...
//!
//! Discovers stylesheets under the given paths, watches each one, and when a
//! file changes recompiles it together with every file that imports it.

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config loading logs before the configured verbosity is known.
    let loaded = tracing::subscriber::with_default(subscriber(cli.verbose), || {
        commands::watch::load_config(&cli)
    })?;
    subscriber(commands::watch::effective_verbosity(cli.verbose, &loaded.config)).init();

    commands::watch::cmd_watch(&cli, loaded)
}

/// Trace logging goes to stderr; `RUST_LOG` overrides the verbosity.
fn subscriber(verbose: u8) -> impl tracing::Subscriber + Send + Sync + 'static {
    let default = match verbose {
        0 => "warn",
        1 => "warn,stylewatch=debug",
        _ => "warn,stylewatch=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
}
