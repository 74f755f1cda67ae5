use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::classify::DEFAULT_FACTORY_NAME;
use crate::core::definition::Separator;

pub const CONFIG_FILE_NAME: &str = ".minerrrc.json";

pub const DEFAULT_ERRORS_FILE: &str = "errors.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_factory_name")]
    pub factory_name: String,
    /// Where the registry is written; `-` means stdout.
    #[serde(default = "default_errors")]
    pub errors: String,
    /// Documentation base URL. Definition substitution only runs when set.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub separator: Separator,
    /// Replacement definition source; `None` uses the bundled one.
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_factory_name() -> String {
    DEFAULT_FACTORY_NAME.to_string()
}

fn default_errors() -> String {
    DEFAULT_ERRORS_FILE.to_string()
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"]
        .map(String::from)
        .to_vec()
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            factory_name: default_factory_name(),
            errors: default_errors(),
            url: None,
            separator: Separator::default(),
            definition: None,
            extensions: default_extensions(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or an unusable
    /// factory name.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        validate_factory_name(&self.factory_name)
    }
}

/// Reject factory names that would make every call look like an instance.
pub fn validate_factory_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        anyhow::bail!(
            "Invalid factory name: \"{}\" (must be a non-empty identifier)",
            name
        );
    }
    Ok(())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
