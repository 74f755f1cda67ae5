//! Expand command-line paths into the list of source files to process.
//!
//! Order matters to the pass (first definition wins, later registry writes win),
//! so files come out in argument order, each directory walked by file name.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Result of discovering files.
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    pub files: Vec<PathBuf>,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
}

/// Walk `paths` and collect files with one of `extensions`.
///
/// Explicit file arguments are always kept. Anything matching an `ignores` glob
/// is skipped, whether it was named explicitly or found while walking.
pub fn discover_files(
    paths: &[PathBuf],
    extensions: &[String],
    ignores: &[String],
    verbose: bool,
) -> Result<DiscoveredFiles> {
    let mut ignore_patterns = Vec::with_capacity(ignores.len());
    for p in ignores {
        match Pattern::new(p) {
            Ok(pattern) => ignore_patterns.push(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
            }
        }
    }
    let is_ignored = |path: &Path| {
        let path_str = path.to_string_lossy();
        ignore_patterns.iter().any(|p| p.matches(&path_str))
    };

    let mut result = DiscoveredFiles::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in paths {
        if !root.exists() {
            bail!("Path does not exist: {}", root.display());
        }

        if root.is_file() {
            if !is_ignored(root) && seen.insert(root.clone()) {
                result.files.push(root.clone());
            }
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry.path()));
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file()
                && has_extension(path, extensions)
                && seen.insert(path.to_path_buf())
            {
                result.files.push(path.to_path_buf());
            }
        }
    }

    Ok(result)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
