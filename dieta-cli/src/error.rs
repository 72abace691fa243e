//! Error types for the document generation flow
//!
//! One enum per failure domain so callers can tell apart "the network broke",
//! "the directory file is malformed", "this DNI has no record", and "the
//! template could not be filled in". The orchestration layer wraps these in
//! `anyhow` with context; nothing signals failure through absent values.

use std::path::PathBuf;

use reqwest::StatusCode;

/// Failure to retrieve a remote spreadsheet resource
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} returned {status}")]
    Status { url: String, status: StatusCode },
}

/// Failure to parse the worker directory spreadsheet
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open directory workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("directory workbook has no worksheets")]
    NoWorksheet,

    #[error("directory sheet '{sheet}' is empty")]
    Empty { sheet: String },

    #[error("directory sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

/// Failure to find a worker record
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no worker record found for DNI {dni}")]
    NotFound { dni: String },
}

/// Failure to fill in and save a template
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("failed to open template workbook: {0}")]
    Template(#[from] umya_spreadsheet::XlsxError),

    #[error("merge plan maps cell {address} more than once")]
    DuplicateCell { address: String },

    #[error("failed to create output directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save document {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: umya_spreadsheet::XlsxError,
    },
}

/// Failure to launch the produced document
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("failed to open {path} with the system handler: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
