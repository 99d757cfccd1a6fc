//! Character sheet builder entry point.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use sheet_cli::{CliArgs, Session, SessionConfig};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig::from_args(&args).context("failed to configure session")?;
    tracing::debug!(features = config.registry.len(), "starting session");

    let stdin = io::stdin();
    let mut session = Session::new(config, io::stdout().lock());
    session
        .run(stdin.lock())
        .context("session input/output failed")
}
