//! Static string evaluation.
//!
//! Only two shapes are understood: a string literal, and `+` between two
//! understood shapes. Parentheses are transparent. Anything else fails with the
//! kind and span of the offending sub-expression, so the caller can report it.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{BinaryOp, Expr, Lit};

use crate::utils::{expr_type_name, unwrap_paren};

/// Why an expression has no static string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    /// Expression kind that stopped evaluation (e.g. "Ident", "Call").
    pub expr_type: String,
    /// Span of that sub-expression.
    pub span: Span,
}

impl Unsupported {
    pub fn new(expr_type: impl Into<String>, span: Span) -> Self {
        Self {
            expr_type: expr_type.into(),
            span,
        }
    }
}

/// Evaluate `expr` to a string, concatenating left to right.
///
/// `'a' + 'b' + 'c'` parses as `('a' + 'b') + 'c'` and yields `"abc"`.
pub fn eval_static_string(expr: &Expr) -> Result<String, Unsupported> {
    let mut out = String::new();
    append_static_string(expr, &mut out)?;
    Ok(out)
}

fn append_static_string(expr: &Expr, out: &mut String) -> Result<(), Unsupported> {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
            Some(value) => {
                out.push_str(value);
                Ok(())
            }
            None => Err(Unsupported::new("Str (lone surrogate)", s.span)),
        },
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            append_static_string(&bin.left, out)?;
            append_static_string(&bin.right, out)
        }
        other => Err(Unsupported::new(expr_type_name(other), other.span())),
    }
}
