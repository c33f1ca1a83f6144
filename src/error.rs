use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for FDL operations.
#[derive(Debug, Error)]
pub enum FdlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse FDL JSON{}: {source}", path_suffix(.path, "from"))]
    JsonParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write FDL JSON{}: {source}", path_suffix(.path, "to"))]
    JsonWrite {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// A value of the wrong shape was assigned to a typed field.
    #[error("{record}.{field}: {message}")]
    Shape {
        record: &'static str,
        field: String,
        message: String,
    },

    /// A well-typed value breaks a rule of its record.
    #[error("{record}.{field}: {message}")]
    InvalidValue {
        record: &'static str,
        field: String,
        message: String,
    },

    #[error("Item must have a valid identifier (\"{attribute}\"), not None or empty string")]
    MissingIdentifier {
        record: &'static str,
        attribute: &'static str,
    },

    #[error("{record}.{attribute} (\"{id}\") already exists.")]
    DuplicateIdentifier {
        record: &'static str,
        attribute: &'static str,
        id: String,
    },

    #[error("\"{value}\" is not a valid option for \"{field}\". Please use one of the following: {}", .options.join(", "))]
    InvalidOption {
        field: &'static str,
        value: String,
        options: &'static [&'static str],
    },

    #[error("{record} is missing some required attributes: {}", .missing.join(", "))]
    MissingRequired {
        record: &'static str,
        missing: Vec<String>,
    },

    #[error("Cannot compute framing geometry: {0}")]
    Fit(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported FDL schema version: {major}.{minor}")]
    UnsupportedSchemaVersion { major: u64, minor: u64 },

    #[error("Unknown handler: {0}")]
    UnknownHandler(String),
}

fn path_suffix(path: &Option<PathBuf>, preposition: &str) -> String {
    match path {
        Some(path) => format!(" {} {}", preposition, path.display()),
        None => String::new(),
    }
}
