//! Binary crate for the `advisor` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Reading observations from files, stdin or interactive prompts
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod prompt;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
