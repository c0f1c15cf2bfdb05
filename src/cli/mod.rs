//! Command-line interface for backsearch
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing; each subcommand lives in [`commands`].

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;

pub mod commands;
mod output;

pub use output::Output;

use commands::find::FindArgs;

/// backsearch - search outward from a directory, then down into every sibling
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (matches only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for entries matching a pattern
    Find(FindArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormatArg,
    },
    /// Validate the merged configuration
    Validate,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ConfigFormatArg {
    Toml,
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<ExitCode> {
        // Initialize output handler with global verbose and quiet settings
        let output = Output::new(self.verbose, self.quiet);
        let config_path = self.config.as_deref();

        match self.command {
            Some(Commands::Find(args)) => commands::find::execute(args, config_path, &output).await,
            Some(Commands::Config(cmd)) => {
                commands::config::execute(cmd, config_path, &output).await?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Commands::Version) => {
                commands::version::execute(&output).await?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
