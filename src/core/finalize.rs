//! Post-traversal step: resolve candidates, fill the registry, rewrite the trees.

use std::collections::HashSet;

use swc_common::{SourceMap, Span, Spanned};
use swc_ecma_ast::{CallExpr, ExprOrSpread, FnDecl, Program};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::core::SourceContext;
use crate::core::definition::Replacement;
use crate::core::edit::Edit;
use crate::core::eval::{Unsupported, eval_static_string};
use crate::core::namespace::resolve_namespace;
use crate::core::registry::Registry;
use crate::core::scan::{Instance, ScanResult};
use crate::issues::{Issue, UnsupportedStringIssue};

/// What finalize produced.
#[derive(Debug, Default)]
pub struct Finalized {
    pub registry: Registry,
    /// Diagnostics from scanning followed by those from resolution.
    pub issues: Vec<Issue>,
    /// Text form of every tree mutation; nested edits are subsumed on apply.
    pub edits: Vec<Edit>,
    /// Whether any tree was mutated. When false, `edits` is empty and sources
    /// can be left alone.
    pub code_changed: bool,
    pub definition_replaced: bool,
}

/// Resolve every candidate in discovery order and mutate `programs` in place.
pub fn finalize(
    scan: ScanResult,
    programs: &mut [Program],
    replacement: Option<&Replacement>,
    source_map: &SourceMap,
) -> Finalized {
    let ScanResult {
        instances,
        definition,
        mut issues,
    } = scan;

    let mut registry = Registry::new();
    let mut edits = Vec::new();
    let mut resolved = HashSet::new();

    for instance in &instances {
        let namespace = resolve_namespace(instance.shape.as_shape());
        let code = resolve_arg(instance, instance.code_arg());
        let message = resolve_arg(instance, instance.template_arg());

        let (namespace, code, message) = match (namespace, code, message) {
            (Ok(namespace), Ok(code), Ok(message)) => (namespace, code, message),
            (namespace, code, message) => {
                let failures = [namespace.err(), code.err(), message.err()];
                issues.extend(
                    failures
                        .into_iter()
                        .flatten()
                        .map(|failure| unsupported_issue(source_map, failure)),
                );
                continue;
            }
        };

        registry.insert(namespace.as_deref(), &code, &message);
        resolved.insert(instance.span);
        edits.push(Edit::delete(template_removal_span(&instance.args)));
    }

    let definition_target = match (replacement, &definition) {
        (Some(replacement), Some(site)) => {
            edits.push(Edit::replace(site.span, replacement.text.clone()));
            Some((site.span, replacement))
        }
        _ => None,
    };

    let mut rewriter = Rewriter {
        resolved: &resolved,
        definition: definition_target,
        changed: false,
        definition_replaced: false,
    };
    for program in programs.iter_mut() {
        program.visit_mut_with(&mut rewriter);
    }

    Finalized {
        registry,
        issues,
        edits,
        code_changed: rewriter.changed,
        definition_replaced: rewriter.definition_replaced,
    }
}

fn resolve_arg(instance: &Instance, arg: Option<&ExprOrSpread>) -> Result<String, Unsupported> {
    let arg = arg.ok_or_else(|| Unsupported::new("Missing", instance.span))?;
    if let Some(spread) = arg.spread {
        return Err(Unsupported::new("Spread", spread));
    }
    eval_static_string(&arg.expr)
}

fn unsupported_issue(source_map: &SourceMap, failure: Unsupported) -> Issue {
    Issue::UnsupportedString(UnsupportedStringIssue {
        context: SourceContext::from_span(source_map, failure.span),
        expr_type: failure.expr_type,
    })
}

fn arg_span(arg: &ExprOrSpread) -> Span {
    let expr = arg.expr.span();
    match arg.spread {
        Some(spread) => Span::new(spread.lo, expr.hi),
        None => expr,
    }
}

/// Text range removed together with the template argument.
///
/// Covers the argument and the comma that separates it from its neighbour:
/// up to the next argument when there is one, otherwise back to the code.
fn template_removal_span(args: &[ExprOrSpread]) -> Span {
    let template = arg_span(&args[1]);
    match args.get(2) {
        Some(next) => Span::new(template.lo, arg_span(next).lo),
        None => Span::new(arg_span(&args[0]).hi, template.hi),
    }
}

struct Rewriter<'a> {
    resolved: &'a HashSet<Span>,
    definition: Option<(Span, &'a Replacement)>,
    changed: bool,
    definition_replaced: bool,
}

impl<'a> VisitMut for Rewriter<'a> {
    fn visit_mut_call_expr(&mut self, node: &mut CallExpr) {
        node.visit_mut_children_with(self);

        if self.resolved.contains(&node.span) && node.args.len() >= 2 {
            node.args.remove(1);
            self.changed = true;
        }
    }

    fn visit_mut_fn_decl(&mut self, node: &mut FnDecl) {
        node.visit_mut_children_with(self);

        let Some((span, replacement)) = self.definition else {
            return;
        };
        if node.function.span != span {
            return;
        }

        let mut decl = replacement.decl.clone();
        decl.visit_mut_with(&mut Restamp { span });
        *node = decl;
        self.definition = None;
        self.changed = true;
        self.definition_replaced = true;
    }
}

/// Overwrites every span in a subtree.
struct Restamp {
    span: Span,
}

impl VisitMut for Restamp {
    fn visit_mut_span(&mut self, node: &mut Span) {
        *node = self.span;
    }
}
