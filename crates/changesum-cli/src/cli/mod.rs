//! CLI for computing and checking versioned checksums.

mod commands;

use anyhow::Result;
use changesum_core::config;
use clap::{Parser, Subcommand};

use commands::{run_compute, run_parse, run_verify, run_version, InputArgs};

/// Top-level CLI for changesum.
#[derive(Debug, Parser)]
#[command(name = "changesum")]
#[command(about = "changesum: versioned checksums for change content", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Compute the checksum of text, a file, or stdin.
    Compute {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the version and digest of a stored checksum.
    Parse {
        /// Stored checksum, e.g. "8:2cdf9876e74347162401315d34b83746".
        stored: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare a stored checksum against the current content.
    Verify {
        /// Stored checksum to check against.
        stored: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the current checksum algorithm version.
    Version,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Compute { input } => run_compute(&input, &cfg)?,
            CliCommand::Parse { stored, json } => run_parse(&stored, json)?,
            CliCommand::Verify { stored, input } => run_verify(&stored, &input, &cfg)?,
            CliCommand::Version => run_version(),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
