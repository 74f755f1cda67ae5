//! One complete execution of the extraction pass.
//!
//! Lifecycle: create → scan every program → finalize → write the registry to
//! the sink. [`MinErrPass::process`] consumes the pass, so it can't be reused.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::Program;
use swc_ecma_visit::VisitWith;

use crate::core::classify::FactoryMatcher;
use crate::core::definition::Replacement;
use crate::core::finalize::{Finalized, finalize};
use crate::core::scan::Scanner;

pub struct MinErrPass {
    matcher: FactoryMatcher,
    source_map: Arc<SourceMap>,
    replacement: Option<Replacement>,
}

impl MinErrPass {
    /// `source_map` must be the one every processed program was parsed into.
    pub fn new(factory_name: &str, source_map: Arc<SourceMap>) -> Self {
        Self {
            matcher: FactoryMatcher::new(factory_name),
            source_map,
            replacement: None,
        }
    }

    /// Swap the factory's declaration for `replacement` when one is found.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Run over `programs` (in order) and write the compact registry to `sink`.
    ///
    /// Programs are mutated in place; the returned edits mirror the mutations.
    pub fn process<W: Write + ?Sized>(
        self,
        programs: &mut [Program],
        sink: &mut W,
    ) -> Result<Finalized> {
        let mut scanner = Scanner::new(&self.matcher, &self.source_map);
        for program in programs.iter() {
            program.visit_with(&mut scanner);
        }

        let finalized = finalize(
            scanner.finish(),
            programs,
            self.replacement.as_ref(),
            &self.source_map,
        );
        finalized.registry.write_to(sink)?;

        Ok(finalized)
    }
}
