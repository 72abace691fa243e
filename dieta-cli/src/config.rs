//! Settings for the document generation flow
//!
//! Everything has a built-in default; a TOML file at
//! `<config dir>/dietasoft/config.toml` (or one named with `--config`)
//! overrides individual fields.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Remote location of the worker directory workbook
const DEFAULT_DIRECTORY_URL: &str =
    "https://raw.githubusercontent.com/amaemesoft/dietasoft/main/basededatos.xlsx";

/// Default output directory, relative to the working directory
const DEFAULT_OUTPUT_DIR: &str = "documentos";

/// Append-only log file name, kept from the original deployment
const LOG_FILE_NAME: &str = "registro_errores.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// URL of the worker directory workbook
    pub directory_url: String,
    /// Directory the produced documents are written to
    pub output_dir: PathBuf,
    /// Plain-text log file, appended to on every run
    pub log_file: PathBuf,
    /// Optional replacement for the embedded template catalog
    pub catalog_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_file: default_log_file(),
            catalog_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default config location when
    /// `path` is `None`. A missing default file is not an error; a missing
    /// explicitly named file is.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_file() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Settings::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dietasoft").join("config.toml"))
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("dietasoft").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_remote_directory() {
        let settings = Settings::default();
        assert!(settings.directory_url.ends_with("/basededatos.xlsx"));
        assert_eq!(settings.output_dir, PathBuf::from("documentos"));
        assert!(settings.catalog_file.is_none());
    }

    #[test]
    fn partial_config_file_keeps_remaining_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "output_dir = \"/tmp/dietas\"").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/dietas"));
        assert!(settings.directory_url.ends_with("/basededatos.xlsx"));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "directoy_url = \"typo\"").unwrap();

        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn explicitly_named_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/no/such/config.toml"))).is_err());
    }
}
