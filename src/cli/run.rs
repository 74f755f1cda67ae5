//! Dispatch a parsed command line to its command handler.
//!
//! Handlers return `Ok(CommandResult)` with the diagnostics and summary to
//! report, or `Err` for fatal failures (config, output sink, replacement
//! definition).

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
