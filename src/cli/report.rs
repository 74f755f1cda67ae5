//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow minerr to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, WriteMode,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to a custom writer, sorted by location, followed by a summary.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_problems(&sorted, writer);
}

/// Print the outcome of a command.
///
/// Everything goes to stdout, except when the registry itself was written to
/// stdout: the report then moves to stderr so the JSON stays machine-readable.
pub fn print(result: &CommandResult) {
    let registry_on_stdout = matches!(
        &result.summary,
        CommandSummary::Extract(summary) if summary.errors_path.is_none()
    );

    if registry_on_stdout {
        print_to(result, &mut io::stderr().lock());
    } else {
        print_to(result, &mut io::stdout().lock());
    }
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            report_to(&result.issues, writer);
            print_extract(summary, writer);
        }
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_extract<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    let target = match &summary.errors_path {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} in {} {} from {} source {} into {}",
            summary.message_count,
            plural(summary.message_count, "message"),
            summary.namespace_count,
            plural(summary.namespace_count, "namespace"),
            summary.files_processed,
            plural(summary.files_processed, "file"),
            target
        )
        .green()
    );

    if summary.definition_replaced {
        let _ = writeln!(writer, "  - replaced the factory definition");
    }

    let changed = summary.changed_files.len();
    if changed == 0 {
        return;
    }

    match &summary.write_mode {
        WriteMode::DryRun => {
            let _ = writeln!(
                writer,
                "{} {} {}:",
                "Would rewrite".yellow().bold(),
                changed,
                plural(changed, "file")
            );
            for path in &summary.changed_files {
                let _ = writeln!(writer, "  - {}", path.display());
            }
            let _ = writeln!(
                writer,
                "Run with {} to rewrite these files.",
                "--apply".cyan()
            );
        }
        WriteMode::InPlace => {
            let _ = writeln!(
                writer,
                "{} {} {}.",
                "Rewrote".green().bold(),
                changed,
                plural(changed, "file")
            );
        }
        WriteMode::OutDir(dir) => {
            let _ = writeln!(
                writer,
                "{} {} {} to {}.",
                "Wrote".green().bold(),
                changed,
                plural(changed, "file"),
                dir.display()
            );
        }
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match source_line {
        Some(source_line) => {
            let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };

            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );

            // col is 1-based
            let prefix = if col > 1 {
                source_line.chars().take(col - 1).collect::<String>()
            } else {
                String::new()
            };
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_problems<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem"),
        total_errors,
        plural(total_errors, "error").red(),
        total_warnings,
        plural(total_warnings, "warning").yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col, _) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col, _) = extract_location_info(&b_loc);

    a_path
        .cmp(b_path)
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
        .then_with(|| a.rule().cmp(&b.rule()))
}
