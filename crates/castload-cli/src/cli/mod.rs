//! CLI for castload.

mod commands;

use anyhow::Result;
use castload_core::config;
use castload_core::source::SourceOptions;
use clap::{Parser, Subcommand};

use commands::{run_cat, run_info};

/// Top-level CLI for castload.
#[derive(Debug, Parser)]
#[command(name = "castload")]
#[command(about = "castload: open asciicast recordings from files, stdin, URLs or IPFS", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show header information and event count of a recording.
    Info {
        /// Path, URL, ipfs:/ or fs:/ reference, or - for stdin.
        locator: String,
    },

    /// Print the output of a recording without timing.
    Cat {
        /// Path, URL, ipfs:/ or fs:/ reference, or - for stdin.
        locator: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let opts = SourceOptions::from_config(&cfg);

        match cli.command {
            CliCommand::Info { locator } => run_info(&locator, &opts)?,
            CliCommand::Cat { locator } => run_cat(&locator, &opts)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
