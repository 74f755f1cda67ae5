//! Byte-range text edits over original sources.
//!
//! Every structural mutation made by the pass is mirrored by an [`Edit`] so a
//! rewritten file keeps its original formatting and comments everywhere else.

use swc_common::{BytePos, SourceFile, Span};

/// Replace the text covered by `span` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub text: String,
}

impl Edit {
    pub fn delete(span: Span) -> Self {
        Self {
            span,
            text: String::new(),
        }
    }

    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    fn contains(&self, other: &Edit) -> bool {
        self.span.lo <= other.span.lo && other.span.hi <= self.span.hi
    }
}

/// True when `span` lies inside `file` in the shared source map.
pub fn span_in_file(span: Span, file: &SourceFile) -> bool {
    file.start_pos <= span.lo && span.hi <= file.end_pos
}

/// Apply the edits belonging to `file` to its original `code`.
///
/// Edits outside the file are ignored. An edit nested inside another one is
/// dropped, since the outer replacement already covers its text.
pub fn apply_edits(code: &str, file: &SourceFile, edits: &[Edit]) -> String {
    let mut own: Vec<&Edit> = edits
        .iter()
        .filter(|edit| span_in_file(edit.span, file))
        .collect();
    own.sort_by(|a, b| a.span.lo.cmp(&b.span.lo).then(b.span.hi.cmp(&a.span.hi)));

    let mut kept: Vec<&Edit> = Vec::with_capacity(own.len());
    for edit in own {
        match kept.last() {
            Some(outer) if outer.contains(edit) => continue,
            Some(prev) if edit.span.lo < prev.span.hi => continue,
            _ => kept.push(edit),
        }
    }

    let mut out = String::with_capacity(code.len());
    let mut cursor = 0;
    for edit in kept {
        let start = offset(file.start_pos, edit.span.lo, code.len());
        let end = offset(file.start_pos, edit.span.hi, code.len());
        if start < cursor {
            continue;
        }
        out.push_str(&code[cursor..start]);
        out.push_str(&edit.text);
        cursor = end;
    }
    out.push_str(&code[cursor..]);
    out
}

fn offset(start: BytePos, pos: BytePos, len: usize) -> usize {
    ((pos.0 - start.0) as usize).min(len)
}
