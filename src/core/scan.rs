//! Single post-order walk that finds instances and the factory definition.
//!
//! The scanner never mutates. It stores owned snapshots of everything the
//! finalize step needs (spans and cloned argument expressions), so mutation can
//! happen later in a separate `VisitMut` walk.

use std::collections::HashSet;

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{CallExpr, ExprOrSpread, FnDecl, ThrowStmt};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::classify::{FactoryMatcher, InstanceShape};
use crate::core::{SourceContext, SourceLocation};
use crate::issues::{Issue, MultipleDefinitionsIssue, NonFactoryThrowIssue};

/// Owned copy of an instance's shape.
#[derive(Debug, Clone)]
pub enum ShapeSnapshot {
    /// Clone of the inner `minErr(...)` call.
    Direct(CallExpr),
    /// Prefix captured from `<prefix>MinErr`.
    Namespaced(String),
}

impl ShapeSnapshot {
    fn capture(shape: InstanceShape<'_>) -> Self {
        match shape {
            InstanceShape::Direct(inner) => ShapeSnapshot::Direct(inner.clone()),
            InstanceShape::Namespaced(prefix) => ShapeSnapshot::Namespaced(prefix.to_string()),
        }
    }

    pub fn as_shape(&self) -> InstanceShape<'_> {
        match self {
            ShapeSnapshot::Direct(inner) => InstanceShape::Direct(inner),
            ShapeSnapshot::Namespaced(prefix) => InstanceShape::Namespaced(prefix),
        }
    }
}

/// A candidate error-construction call.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Span of the outer call; identifies the node during rewriting.
    pub span: Span,
    pub shape: ShapeSnapshot,
    /// Arguments of the outer call: code, template, then runtime parameters.
    pub args: Vec<ExprOrSpread>,
}

impl Instance {
    pub fn code_arg(&self) -> Option<&ExprOrSpread> {
        self.args.first()
    }

    pub fn template_arg(&self) -> Option<&ExprOrSpread> {
        self.args.get(1)
    }
}

/// The canonical `function minErr(...) {}` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSite {
    /// Span of the declaration's function (from the `function` keyword to `}`).
    pub span: Span,
    pub location: SourceLocation,
}

/// Everything the scanner accumulated across one or more programs.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Retained instances in discovery (post-order) order.
    pub instances: Vec<Instance>,
    pub definition: Option<DefinitionSite>,
    pub issues: Vec<Issue>,
}

pub struct Scanner<'a> {
    matcher: &'a FactoryMatcher,
    source_map: &'a SourceMap,
    result: ScanResult,
}

impl<'a> Scanner<'a> {
    pub fn new(matcher: &'a FactoryMatcher, source_map: &'a SourceMap) -> Self {
        Self {
            matcher,
            source_map,
            result: ScanResult::default(),
        }
    }

    pub fn finish(self) -> ScanResult {
        self.result
    }

    fn context(&self, span: Span) -> SourceContext {
        SourceContext::from_span(self.source_map, span)
    }
}

impl<'a> Visit for Scanner<'a> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        node.visit_children_with(self);

        if let Some(shape) = self.matcher.instance_shape(node) {
            self.result.instances.push(Instance {
                span: node.span,
                shape: ShapeSnapshot::capture(shape),
                args: node.args.clone(),
            });
        }
    }

    fn visit_throw_stmt(&mut self, node: &ThrowStmt) {
        node.visit_children_with(self);

        if self.matcher.is_instance_expr(&node.arg) {
            return;
        }

        let issue = NonFactoryThrowIssue {
            context: self.context(node.span),
            factory_name: self.matcher.factory_name().to_string(),
        };
        self.result.issues.push(Issue::NonFactoryThrow(issue));

        let mut nested = NestedInstances {
            matcher: self.matcher,
            spans: HashSet::new(),
        };
        node.arg.visit_with(&mut nested);
        if !nested.spans.is_empty() {
            self.result
                .instances
                .retain(|instance| !nested.spans.contains(&instance.span));
        }
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        node.visit_children_with(self);

        if !self.matcher.is_definition(node) {
            return;
        }

        let context = self.context(node.function.span);
        match &self.result.definition {
            None => {
                self.result.definition = Some(DefinitionSite {
                    span: node.function.span,
                    location: context.location,
                });
            }
            Some(first) => {
                let issue = MultipleDefinitionsIssue {
                    context,
                    factory_name: self.matcher.factory_name().to_string(),
                    first_definition: first.location.clone(),
                };
                self.result.issues.push(Issue::MultipleDefinitions(issue));
            }
        }
    }
}

/// Collects the spans of every instance below a node.
struct NestedInstances<'a> {
    matcher: &'a FactoryMatcher,
    spans: HashSet<Span>,
}

impl<'a> Visit for NestedInstances<'a> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        node.visit_children_with(self);
        if self.matcher.is_instance(node) {
            self.spans.insert(node.span);
        }
    }
}
