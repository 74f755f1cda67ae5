use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use colored::Colorize;
use swc_common::{SourceFile, SourceMap};
use swc_ecma_ast::Program;

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary, WriteMode};
use crate::{
    config::{Config, load_config, validate_factory_name},
    core::{
        MinErrPass,
        definition::{BUNDLED_DEFINITION, Replacement, Separator},
        edit::apply_edits,
        files::discover_files,
        parsers::js::parse_source,
    },
    issues::{Issue, ParseErrorIssue},
};

/// Registry destination meaning stdout.
const STDOUT_TARGET: &str = "-";

/// Effective settings: config file values overridden by flags.
struct ExtractOptions {
    factory_name: String,
    errors: String,
    url: Option<String>,
    separator: Separator,
    definition: Option<PathBuf>,
    write_mode: WriteMode,
    verbose: bool,
}

impl ExtractOptions {
    fn resolve(cmd: &ExtractCommand, config: &Config) -> Result<Self> {
        let separator = if cmd.separate_with_colon {
            Separator::Colon
        } else {
            config.separator
        };
        let write_mode = match (&cmd.out_dir, cmd.apply) {
            (Some(dir), _) => WriteMode::OutDir(dir.clone()),
            (None, true) => WriteMode::InPlace,
            (None, false) => WriteMode::DryRun,
        };

        let factory_name = match &cmd.factory {
            Some(name) => {
                validate_factory_name(name).context("Invalid value for '--factory'")?;
                name.clone()
            }
            None => config.factory_name.clone(),
        };

        Ok(Self {
            factory_name,
            errors: cmd.errors.clone().unwrap_or_else(|| config.errors.clone()),
            url: cmd.url.clone().or_else(|| config.url.clone()),
            separator,
            definition: cmd
                .definition
                .clone()
                .or_else(|| config.definition.as_ref().map(PathBuf::from)),
            write_mode,
            verbose: cmd.verbose,
        })
    }
}

/// A parsed file, minus its program (which goes to the pass).
struct LoadedFile {
    path: PathBuf,
    source_file: Arc<SourceFile>,
    code: String,
}

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let loaded_config = load_config(&cwd)?;
    if cmd.verbose
        && let Some(path) = &loaded_config.path
    {
        eprintln!("Using config {}", path.display());
    }
    let config = loaded_config.config;
    let options = ExtractOptions::resolve(&cmd, &config)?;

    let discovered = discover_files(&cmd.paths, &config.extensions, &config.ignores, options.verbose)?;
    let source_map: Arc<SourceMap> = Default::default();
    let replacement = load_replacement(&options, source_map.clone())?;

    // Opened before anything is parsed or rewritten: failing here is fatal.
    let errors_path = (options.errors != STDOUT_TARGET).then(|| PathBuf::from(&options.errors));
    let mut sink = open_sink(errors_path.as_deref())?;

    let mut issues: Vec<Issue> = Vec::new();
    let mut programs: Vec<Program> = Vec::new();
    let mut files: Vec<LoadedFile> = Vec::new();

    for path in &discovered.files {
        let display = path.to_string_lossy().to_string();
        if options.verbose {
            eprintln!("{} {}", "Parsing".cyan(), display);
        }
        let code = match fs::read_to_string(path) {
            Ok(code) => code,
            Err(e) => {
                issues.push(parse_error(&display, format!("Failed to read file: {}", e)));
                continue;
            }
        };
        match parse_source(code, &display, source_map.clone()) {
            Ok(parsed) => {
                programs.push(parsed.program);
                files.push(LoadedFile {
                    path: path.clone(),
                    source_file: parsed.source_file,
                    code: parsed.code,
                });
            }
            Err(e) => {
                if options.verbose {
                    eprintln!("{} {}", "warning:".bold().yellow(), e);
                }
                issues.push(parse_error(&display, e.to_string()));
            }
        }
    }

    let mut pass = MinErrPass::new(&options.factory_name, source_map);
    if let Some(replacement) = replacement {
        pass = pass.with_replacement(replacement);
    }
    let finalized = pass.process(&mut programs, &mut sink)?;
    if errors_path.is_none() {
        writeln!(sink).context("Failed to write error registry")?;
    }
    sink.flush().context("Failed to flush error registry")?;
    drop(sink);

    let mut changed_files = Vec::new();
    let rewritable: &[LoadedFile] = if finalized.code_changed { &files } else { &[] };
    for file in rewritable {
        let rewritten = apply_edits(&file.code, &file.source_file, &finalized.edits);
        if rewritten == file.code {
            continue;
        }
        let destination = match &options.write_mode {
            WriteMode::DryRun => file.path.clone(),
            WriteMode::InPlace => {
                fs::write(&file.path, &rewritten)
                    .with_context(|| format!("Failed to write {}", file.path.display()))?;
                file.path.clone()
            }
            WriteMode::OutDir(dir) => {
                let destination = dir.join(relative_destination(&file.path, &cwd));
                write_creating_dirs(&destination, &rewritten)?;
                destination
            }
        };
        if options.verbose && options.write_mode != WriteMode::DryRun {
            eprintln!("{} {}", "Rewrote".green(), destination.display());
        }
        changed_files.push(destination);
    }

    issues.extend(finalized.issues);

    let summary = ExtractSummary {
        files_processed: files.len(),
        message_count: finalized.registry.len(),
        namespace_count: finalized.registry.namespace_names().count(),
        errors_path,
        write_mode: options.write_mode,
        changed_files,
        definition_replaced: finalized.definition_replaced,
    };

    Ok(CommandResult::new(CommandSummary::Extract(summary), issues))
}

/// The replacement factory, only built when a documentation URL is known.
fn load_replacement(
    options: &ExtractOptions,
    source_map: Arc<SourceMap>,
) -> Result<Option<Replacement>> {
    let Some(url) = &options.url else {
        if options.verbose && options.definition.is_some() {
            eprintln!(
                "{} the replacement definition is only used together with {}",
                "warning:".bold().yellow(),
                "--url".cyan()
            );
        }
        return Ok(None);
    };

    let source = match &options.definition {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read definition file: {}", path.display()))?,
        None => BUNDLED_DEFINITION.to_string(),
    };

    Replacement::load(&source, url, options.separator, source_map).map(Some)
}

fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(io::stdout())),
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to open error registry: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

fn parse_error(file_path: &str, error: String) -> Issue {
    Issue::ParseError(ParseErrorIssue {
        file_path: file_path.to_string(),
        error,
    })
}

/// Path of `path` below an output directory: relative to `cwd` when possible,
/// with `.`, `..` and root components dropped.
fn relative_destination(path: &Path, cwd: &Path) -> PathBuf {
    let path = path.strip_prefix(cwd).unwrap_or(path);
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

fn write_creating_dirs(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
