use swc_common::{SourceMap, Span};

/// Pure position information in a JavaScript/TypeScript source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Position with the source line it points into, for cargo-style reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    /// Resolve the start of `span` against the shared source map.
    ///
    /// Columns are 1-based, lines are 1-based (as displayed by editors).
    pub fn from_span(source_map: &SourceMap, span: Span) -> Self {
        let loc = source_map.lookup_char_pos(span.lo);
        let source_line = loc
            .file
            .get_line(loc.line.saturating_sub(1))
            .map(|line| line.to_string())
            .unwrap_or_default();
        let location = SourceLocation::new(loc.file.name.to_string(), loc.line, loc.col_display + 1);
        Self::new(location, source_line)
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}
