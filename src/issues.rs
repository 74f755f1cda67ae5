//! Diagnostic types produced by the minErr pass.
//!
//! Each issue is self-contained with everything the reporter needs: location,
//! source line, severity and rule name. Issues are data, never errors; the pass
//! always completes regardless of how many it reports.

use enum_dispatch::enum_dispatch;

use crate::core::{SourceContext, SourceLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    NonFactoryThrow,
    UnsupportedStringExpression,
    MultipleDefinitions,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::NonFactoryThrow => write!(f, "non-factory-throw"),
            Rule::UnsupportedStringExpression => write!(f, "unsupported-string-expression"),
            Rule::MultipleDefinitions => write!(f, "multiple-definitions"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A `throw` whose argument is not a factory instance.
///
/// Every instance nested inside the thrown expression is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFactoryThrowIssue {
    pub context: SourceContext,
    /// Factory name the throw was expected to use.
    pub factory_name: String,
}

impl NonFactoryThrowIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NonFactoryThrow
    }
}

/// A code, template or namespace argument without a static string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedStringIssue {
    pub context: SourceContext,
    /// Expression kind that could not be evaluated (e.g. "Ident"), or
    /// "Missing" when the argument is absent.
    pub expr_type: String,
}

impl UnsupportedStringIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedStringExpression
    }
}

/// A second (or later) declaration of the factory function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleDefinitionsIssue {
    pub context: SourceContext,
    pub factory_name: String,
    /// Where the canonical (first) definition lives.
    pub first_definition: SourceLocation,
}

impl MultipleDefinitionsIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MultipleDefinitions
    }
}

/// File could not be parsed; it is left out of the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A diagnostic found while running the pass.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    NonFactoryThrow(NonFactoryThrowIssue),
    UnsupportedString(UnsupportedStringIssue),
    MultipleDefinitions(MultipleDefinitionsIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::NonFactoryThrow(_) => NonFactoryThrowIssue::severity(),
            Issue::UnsupportedString(_) => UnsupportedStringIssue::severity(),
            Issue::MultipleDefinitions(_) => MultipleDefinitionsIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::NonFactoryThrow(_) => NonFactoryThrowIssue::rule(),
            Issue::UnsupportedString(_) => UnsupportedStringIssue::rule(),
            Issue::MultipleDefinitions(_) => MultipleDefinitionsIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for NonFactoryThrowIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!("Throw expression is not a {} instance", self.factory_name)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("messages of nested instances are kept in place".to_string())
    }
}

impl Report for UnsupportedStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        "Can't extract a static string value where one was expected".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("found expression: {}", self.expr_type))
    }

    fn hint(&self) -> Option<String> {
        Some("use a string literal or a concatenation of string literals".to_string())
    }
}

impl Report for MultipleDefinitionsIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        format!(
            "Found definitions for the function '{}' in multiple locations",
            self.factory_name
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "first definition at {}:{}:{}",
            self.first_definition.file_path, self.first_definition.line, self.first_definition.col
        ))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
