use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceFile, SourceMap};
use swc_ecma_ast::Program;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Extensions parsed with the TypeScript grammar.
const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

pub struct ParsedSource {
    pub program: Program,
    /// The registered source file; its byte range identifies this file's spans
    /// inside the shared source map.
    pub source_file: Arc<SourceFile>,
    /// The original text, used to apply edits after the pass.
    pub code: String,
}

/// Pick the swc syntax for a file based on its extension.
///
/// TypeScript extensions get `TsSyntax` (with TSX for `.tsx`), everything else is
/// parsed as ECMAScript with JSX enabled only for `.jsx`.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    if TS_EXTENSIONS.contains(&ext) {
        Syntax::Typescript(TsSyntax {
            tsx: ext == "tsx",
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: ext == "jsx",
            ..Default::default()
        })
    }
}

/// Parse JavaScript/TypeScript source code into a program.
///
/// All files of one pass must share `source_map` so spans are unique across files.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    parse_with_name(
        code,
        FileName::Real(file_path.into()),
        syntax_for_path(file_path),
        source_map,
    )
}

/// Parse a source string that does not come from a file on disk.
pub fn parse_virtual_source(
    code: String,
    name: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    parse_with_name(
        code,
        FileName::Custom(name.to_string()),
        Syntax::Es(EsSyntax::default()),
        source_map,
    )
}

fn parse_with_name(
    code: String,
    name: FileName,
    syntax: Syntax,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let display_name = name.to_string();
        let source_file = source_map.new_source_file(name.into(), code.clone());

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let program = parser
            .parse_program()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", display_name, e))?;

        Ok(ParsedSource {
            program,
            source_file,
            code,
        })
    })
}
