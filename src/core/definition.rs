//! Replacement source for the factory declaration.
//!
//! The replacement is plain JavaScript carrying two textual placeholders,
//! `MINERR_URL` and `MINERR_SEPARATOR`, substituted before parsing. Its first
//! statement must be a function declaration.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use swc_common::SourceMap;
use swc_ecma_ast::{Decl, FnDecl, ModuleItem, Program, Stmt};

use crate::core::parsers::js::parse_virtual_source;

/// The runtime factory shipped with this tool.
pub const BUNDLED_DEFINITION: &str = include_str!("../../assets/minErr.js");

pub const URL_PLACEHOLDER: &str = "MINERR_URL";
pub const SEPARATOR_PLACEHOLDER: &str = "MINERR_SEPARATOR";

/// Separator between namespace and code in generated documentation URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Separator {
    #[default]
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = ":")]
    Colon,
}

impl Separator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Separator::Slash => "/",
            Separator::Colon => ":",
        }
    }
}

/// Substitute every placeholder occurrence with the given values.
pub fn substitute_placeholders(source: &str, url: &str, separator: Separator) -> String {
    source
        .replace(URL_PLACEHOLDER, url)
        .replace(SEPARATOR_PLACEHOLDER, separator.as_str())
}

/// A parsed replacement declaration, ready to be stamped over the definition site.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub decl: FnDecl,
    /// Source text of the declaration alone, used for the text edit.
    pub text: String,
}

impl Replacement {
    /// Substitute placeholders in `source` and parse the resulting declaration.
    pub fn load(
        source: &str,
        url: &str,
        separator: Separator,
        source_map: Arc<SourceMap>,
    ) -> Result<Self> {
        let code = substitute_placeholders(source, url, separator);
        Self::parse(code, source_map)
    }

    /// Parse already-substituted replacement source.
    pub fn parse(code: String, source_map: Arc<SourceMap>) -> Result<Self> {
        let parsed = parse_virtual_source(code, "MINERR_ASSET", source_map)
            .context("Failed to parse the replacement definition")?;

        let first = match parsed.program {
            Program::Module(module) => module.body.into_iter().next().and_then(|item| match item {
                ModuleItem::Stmt(stmt) => Some(stmt),
                ModuleItem::ModuleDecl(_) => None,
            }),
            Program::Script(script) => script.body.into_iter().next(),
        };

        let Some(Stmt::Decl(Decl::Fn(decl))) = first else {
            bail!("The replacement definition must start with a function declaration");
        };

        let span = decl.function.span;
        let start = (span.lo.0 - parsed.source_file.start_pos.0) as usize;
        let end = (span.hi.0 - parsed.source_file.start_pos.0) as usize;
        let text = parsed
            .code
            .get(start..end)
            .with_context(|| format!("Replacement span {:?} is outside its source", span))?
            .to_string();

        Ok(Self { decl, text })
    }
}
