//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Run the extraction pass and write the error registry
//! - `init`: Initialize the minerr configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Files or directories to process
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output path for the error registry, `-` for stdout (overrides config file)
    #[arg(long, value_name = "PATH")]
    pub errors: Option<String>,

    /// Documentation base URL; enables replacing the factory definition
    #[arg(long)]
    pub url: Option<String>,

    /// Separate namespace and code with `:` instead of `/` in documentation URLs
    #[arg(long)]
    pub separate_with_colon: bool,

    /// Replacement definition source (default: the bundled minErr.js)
    #[arg(long, value_name = "PATH")]
    pub definition: Option<PathBuf>,

    /// Name of the error factory function (overrides config file)
    #[arg(long, value_name = "NAME")]
    pub factory: Option<String>,

    /// Rewrite source files in place (default is dry-run)
    #[arg(long, conflicts_with = "out_dir")]
    pub apply: bool,

    /// Write rewritten files under this directory instead of in place
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract error message templates into a JSON registry
    Extract(ExtractCommand),
    /// Initialize a new .minerrrc.json configuration file
    Init,
}
