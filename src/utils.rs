//! Common utility functions shared across the codebase.

use swc_ecma_ast::Expr;

/// Unwrap parentheses: `((expr))` → `expr`.
pub fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        _ => expr,
    }
}

/// Get the type name of an expression for diagnostics.
pub fn expr_type_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Array(_) => "Array",
        Expr::Arrow(_) => "Arrow",
        Expr::Assign(_) => "Assign",
        Expr::Await(_) => "Await",
        Expr::Bin(_) => "Bin",
        Expr::Call(_) => "Call",
        Expr::Class(_) => "Class",
        Expr::Cond(_) => "Cond",
        Expr::Fn(_) => "Fn",
        Expr::Ident(_) => "Ident",
        Expr::Invalid(_) => "Invalid",
        Expr::Lit(_) => "Lit",
        Expr::Member(_) => "Member",
        Expr::MetaProp(_) => "MetaProp",
        Expr::New(_) => "New",
        Expr::Object(_) => "Object",
        Expr::OptChain(_) => "OptChain",
        Expr::Paren(_) => "Paren",
        Expr::PrivateName(_) => "PrivateName",
        Expr::Seq(_) => "Seq",
        Expr::SuperProp(_) => "SuperProp",
        Expr::TaggedTpl(_) => "TaggedTpl",
        Expr::This(_) => "This",
        Expr::Tpl(_) => "Tpl",
        Expr::TsAs(_) => "TsAs",
        Expr::TsConstAssertion(_) => "TsConstAssertion",
        Expr::TsInstantiation(_) => "TsInstantiation",
        Expr::TsNonNull(_) => "TsNonNull",
        Expr::TsSatisfies(_) => "TsSatisfies",
        Expr::TsTypeAssertion(_) => "TsTypeAssertion",
        Expr::Unary(_) => "Unary",
        Expr::Update(_) => "Update",
        Expr::Yield(_) => "Yield",
        Expr::JSXMember(_) => "JSXMember",
        Expr::JSXNamespacedName(_) => "JSXNamespacedName",
        Expr::JSXEmpty(_) => "JSXEmpty",
        Expr::JSXElement(_) => "JSXElement",
        Expr::JSXFragment(_) => "JSXFragment",
        #[allow(unreachable_patterns)]
        _ => "Unknown",
    }
}

/// Upper-case the first character of `name`.
///
/// # Examples
///
/// ```
/// use minerr::utils::capitalize_first;
///
/// assert_eq!(capitalize_first("minErr"), "MinErr");
/// assert_eq!(capitalize_first("ärger"), "Ärger");
/// assert_eq!(capitalize_first(""), "");
/// ```
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pluralize a noun for summary lines: `plural(1, "file")` → `"file"`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}
