//! CLI for upsort.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use upsort_core::config;

use commands::{run_classify, run_config, run_resolve, run_table, ResolveArgs};

/// Top-level CLI for upsort.
#[derive(Debug, Parser)]
#[command(name = "upsort")]
#[command(about = "upsort: sort uploads into category directories by extension", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the category of each filename.
    Classify {
        /// Filenames to classify.
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Resolve the upload dir a file would be stored in.
    Resolve(ResolveArgs),

    /// List the extension table grouped by category.
    Table,

    /// Show the config file path and current values.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Classify { filenames } => run_classify(&filenames),
            CliCommand::Resolve(args) => run_resolve(&cfg, &args)?,
            CliCommand::Table => run_table(),
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
