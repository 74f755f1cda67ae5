//! Instance and definition classification.
//!
//! A call is an *instance* of the error factory when it has one of two shapes:
//!
//! ```text
//! minErr('ng')('badarg', 'Argument {0} is bad', arg)   // direct factory call
//! ngMinErr('badarg', 'Argument {0} is bad', arg)       // namespaced sub-factory
//! ```
//!
//! The namespaced form is recognized purely from the identifier: it must match
//! `^(\S+)<Suffix>$`, where the suffix is the factory name with its first letter
//! upper-cased. Everything here is a pure predicate over node shapes.

use regex::Regex;
use swc_ecma_ast::{CallExpr, Callee, Expr, FnDecl};

use crate::utils::{capitalize_first, unwrap_paren};

pub const DEFAULT_FACTORY_NAME: &str = "minErr";

/// How an instance reaches the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceShape<'a> {
    /// `minErr(...)(code, template, ...)`; holds the inner factory call.
    Direct(&'a CallExpr),
    /// `fooMinErr(code, template, ...)`; holds the captured prefix (`foo`).
    Namespaced(&'a str),
}

/// Precompiled matcher for one factory name.
#[derive(Debug, Clone)]
pub struct FactoryMatcher {
    factory_name: String,
    instance_pattern: Regex,
}

impl FactoryMatcher {
    pub fn new(factory_name: &str) -> Self {
        let suffix = regex::escape(&capitalize_first(factory_name));
        let instance_pattern = Regex::new(&format!(r"^(\S+){}$", suffix))
            .unwrap_or_else(|e| unreachable!("escaped factory pattern is valid: {}", e));
        Self {
            factory_name: factory_name.to_string(),
            instance_pattern,
        }
    }

    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// Namespace prefix of a sub-factory identifier: `fooMinErr` → `Some("foo")`.
    pub fn namespaced_prefix<'n>(&self, name: &'n str) -> Option<&'n str> {
        self.instance_pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// True for `minErr(...)`, i.e. a call whose callee is the factory identifier.
    pub fn is_factory_call(&self, call: &CallExpr) -> bool {
        matches!(
            callee_expr(call),
            Some(Expr::Ident(ident)) if ident.sym.as_str() == self.factory_name
        )
    }

    /// Classify a call, returning its instance shape if it is one.
    pub fn instance_shape<'a>(&self, call: &'a CallExpr) -> Option<InstanceShape<'a>> {
        match callee_expr(call)? {
            Expr::Ident(ident) => self
                .namespaced_prefix(ident.sym.as_str())
                .map(InstanceShape::Namespaced),
            Expr::Call(inner) if self.is_factory_call(inner) => Some(InstanceShape::Direct(inner)),
            _ => None,
        }
    }

    pub fn is_instance(&self, call: &CallExpr) -> bool {
        self.instance_shape(call).is_some()
    }

    /// True when a thrown expression is an instance.
    pub fn is_instance_expr(&self, expr: &Expr) -> bool {
        matches!(unwrap_paren(expr), Expr::Call(call) if self.is_instance(call))
    }

    /// Only `function minErr(...) { ... }` qualifies; no name inference for
    /// anonymous or assigned functions.
    pub fn is_definition(&self, decl: &FnDecl) -> bool {
        decl.ident.sym.as_str() == self.factory_name
    }
}

impl Default for FactoryMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FACTORY_NAME)
    }
}

fn callee_expr(call: &CallExpr) -> Option<&Expr> {
    match &call.callee {
        Callee::Expr(expr) => Some(unwrap_paren(expr)),
        Callee::Super(_) | Callee::Import(_) => None,
    }
}
