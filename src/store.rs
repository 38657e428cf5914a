// Persistence layer: the whole catalog lives in one JSON file. Loading
// reads the entire file into memory, saving overwrites it completely.
// There is no partial or append-style persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use serde_json::Value;

use crate::model::{Catalog, Record};

/// Reads and writes the catalog file at a fixed path.
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    /// Load the catalog from disk. This never fails: a missing or
    /// unreadable file and invalid JSON all degrade to an empty catalog,
    /// and entries that do not validate are skipped with a diagnostic
    /// while the rest of the file is kept.
    pub fn load(&self) -> Catalog {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                println!(
                    "{}",
                    "No catalog file found. Starting with an empty list.".red()
                );
                return Catalog::new();
            }
            Err(err) => {
                println!("{}", format!("Could not read the catalog file: {err}").red());
                return Catalog::new();
            }
        };

        let (catalog, issues) = parse_catalog(&data);
        for issue in issues {
            println!("{}", issue.red());
        }
        catalog
    }

    /// Serialize the full catalog and overwrite the backing file,
    /// creating its parent directory on the first save. Write errors
    /// propagate to the caller; there is no backup or atomic rename.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let data =
            serde_json::to_string_pretty(catalog).context("Failed to serialize the catalog")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write the catalog to {}", self.path.display()))
    }
}

/// Parse the raw catalog file contents into the valid entries and a list
/// of diagnostics for everything that was dropped.
pub fn parse_catalog(data: &str) -> (Catalog, Vec<String>) {
    let value: Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(err) => {
            return (
                Catalog::new(),
                vec![format!("The catalog file is not valid JSON: {err}")],
            );
        }
    };
    let Some(entries) = value.as_object() else {
        return (
            Catalog::new(),
            vec!["The catalog file must contain a JSON object.".to_string()],
        );
    };

    let mut catalog = Catalog::new();
    let mut issues = Vec::new();
    for (title, details) in entries {
        match Record::from_value(details) {
            Ok(record) => {
                catalog.insert(title.clone(), record);
            }
            Err(err) => issues.push(format!("Skipping entry '{title}': {err}")),
        }
    }
    (catalog, issues)
}
