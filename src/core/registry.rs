//! The error message registry written to `errors.json`.
//!
//! Namespaced codes are nested one level; global codes live at the top level
//! next to the namespace keys:
//!
//! ```json
//! { "ng": { "areq": "Argument '{0}' is {1}" }, "badcfg": "Bad config" }
//! ```
//!
//! Keys keep their first-insertion order. A global code that collides with a
//! namespace name replaces the namespace object in the serialized document.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    namespaces: Map<String, Value>,
    global: Map<String, Value>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; an existing `(namespace, code)` entry is overwritten.
    pub fn insert(&mut self, namespace: Option<&str>, code: &str, message: &str) {
        let bucket = match namespace {
            Some(namespace) => {
                let entry = self
                    .namespaces
                    .entry(namespace.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                match entry {
                    Value::Object(codes) => codes,
                    _ => unreachable!("namespace buckets are always objects"),
                }
            }
            None => &mut self.global,
        };
        bucket.insert(code.to_string(), Value::String(message.to_string()));
    }

    pub fn get(&self, namespace: Option<&str>, code: &str) -> Option<&str> {
        let bucket = match namespace {
            Some(namespace) => self.namespaces.get(namespace)?.as_object()?,
            None => &self.global,
        };
        bucket.get(code)?.as_str()
    }

    /// Total number of messages across all namespaces and the global bucket.
    pub fn len(&self) -> usize {
        let namespaced: usize = self
            .namespaces
            .values()
            .filter_map(Value::as_object)
            .map(Map::len)
            .sum();
        namespaced + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Flatten namespaces and global codes into one JSON object.
    pub fn to_json(&self) -> Value {
        let mut out = self.namespaces.clone();
        for (code, message) in &self.global {
            out.insert(code.clone(), message.clone());
        }
        Value::Object(out)
    }

    /// Write the compact JSON document to `writer` (no trailing newline).
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *writer, &self.to_json())
            .context("Failed to write error registry")?;
        writer.flush().context("Failed to flush error registry")?;
        Ok(())
    }
}
