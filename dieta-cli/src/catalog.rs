//! Template catalog: template-category -> template URL
//!
//! The catalog is data, not code: a TOML table compiled into the binary,
//! replaceable with a user-supplied file so new categories can be added
//! without a rebuild. Selection never fails; an unknown or absent category
//! resolves to the default template.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::directory::WorkerRecord;

/// Catalog compiled into the binary
const EMBEDDED_CATALOG: &str = include_str!("catalog.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateCatalog {
    /// Base URL all template files live under
    base_url: String,
    /// File name used when the category has no entry
    default_template: String,
    /// Category -> file name
    templates: BTreeMap<String, String>,
}

impl TemplateCatalog {
    /// The built-in catalog. Parsing is infallible by construction; the
    /// embedded document is validated by tests.
    pub fn embedded() -> TemplateCatalog {
        toml::from_str(EMBEDDED_CATALOG).expect("embedded catalog.toml is valid")
    }

    /// Load a replacement catalog from a TOML file.
    pub fn from_path(path: &Path) -> Result<TemplateCatalog> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse catalog file {}", path.display()))
    }

    /// Resolve the template URL for a worker record.
    pub fn select(&self, record: &WorkerRecord) -> String {
        let file = record
            .template_category
            .as_deref()
            .and_then(|category| self.templates.get(category))
            .unwrap_or(&self.default_template);

        self.url_for(file)
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    fn url_for(&self, file: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(file)
        )
    }
}
