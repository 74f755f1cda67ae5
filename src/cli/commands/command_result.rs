use std::path::PathBuf;

use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

/// Where rewritten sources go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Report what would change, touch nothing but the registry.
    DryRun,
    InPlace,
    OutDir(PathBuf),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Number of source files handed to the pass (parse failures excluded).
    pub files_processed: usize,
    pub message_count: usize,
    pub namespace_count: usize,
    /// Registry destination; `None` when written to stdout.
    pub errors_path: Option<PathBuf>,
    pub write_mode: WriteMode,
    /// Files whose text changed, with their destination.
    pub changed_files: Vec<PathBuf>,
    pub definition_replaced: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running minerr commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Diagnostics reported by the pass, parse errors included.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, issues: Vec<Issue>) -> Self {
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            summary,
            error_count,
            warning_count,
            issues,
        }
    }
}
