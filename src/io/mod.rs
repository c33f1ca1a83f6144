//! Reading and writing FDL documents.
//!
//! The free functions read and write the `.fdl` JSON form directly. A
//! [`HandlerRegistry`] picks a [`Handler`] by name or by file suffix for
//! callers that deal with more than one format.

mod handler;

pub use handler::{FdlHandler, Handler};

use std::path::Path;

use crate::error::FdlError;
use crate::model::Fdl;

/// Indentation used when none is requested explicitly.
pub const DEFAULT_INDENT: usize = 2;

/// Reads a document from a JSON string, validating it if `validate` is set.
pub fn read_from_string(s: &str, validate: bool) -> Result<Fdl, FdlError> {
    FdlHandler.read_from_string(s, validate)
}

/// Reads a document from a `.fdl` file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if `validate`
/// is set and validation finds errors.
pub fn read_from_file(path: &Path, validate: bool) -> Result<Fdl, FdlError> {
    FdlHandler.read_from_file(path, validate)
}

/// Writes a document to a JSON string. `indent` of `None` writes compact
/// JSON.
pub fn write_to_string(fdl: &Fdl, validate: bool, indent: Option<usize>) -> Result<String, FdlError> {
    FdlHandler.write_to_string(fdl, validate, indent)
}

/// Writes a document to a `.fdl` file.
pub fn write_to_file(
    fdl: &Fdl,
    path: &Path,
    validate: bool,
    indent: Option<usize>,
) -> Result<(), FdlError> {
    FdlHandler.write_to_file(fdl, path, validate, indent)
}

/// The set of available handlers.
///
/// When two handlers share a name, the first one registered wins.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// A registry holding the built-in handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.add(Box::new(FdlHandler));
        registry
    }

    pub fn add(&mut self, handler: Box<dyn Handler>) {
        if self.handlers.iter().any(|h| h.name() == handler.name()) {
            return;
        }
        self.handlers.push(handler);
    }

    /// Names of all registered handlers, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn get_by_name(&self, name: &str) -> Result<&dyn Handler, FdlError> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| &**h)
            .ok_or_else(|| {
                FdlError::UnknownHandler(format!(
                    "no handler named {:?}; available: {}",
                    name,
                    self.names().join(", ")
                ))
            })
    }

    /// Looks a handler up by suffix, including the dot (`".fdl"`).
    pub fn get_by_suffix(&self, suffix: &str) -> Result<&dyn Handler, FdlError> {
        self.handlers
            .iter()
            .find(|h| h.suffixes().contains(&suffix))
            .map(|h| &**h)
            .ok_or_else(|| {
                FdlError::UnknownHandler(format!("no handler supports suffix {suffix:?}"))
            })
    }

    /// Picks a handler by `name` when given, else by the suffix of `path`.
    pub fn resolve(&self, path: &Path, name: Option<&str>) -> Result<&dyn Handler, FdlError> {
        if let Some(name) = name {
            return self.get_by_name(name);
        }
        let suffix = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        self.get_by_suffix(&suffix)
    }

    pub fn read_from_file(
        &self,
        path: &Path,
        name: Option<&str>,
        validate: bool,
    ) -> Result<Fdl, FdlError> {
        self.resolve(path, name)?.read_from_file(path, validate)
    }

    pub fn write_to_file(
        &self,
        fdl: &Fdl,
        path: &Path,
        name: Option<&str>,
        validate: bool,
        indent: Option<usize>,
    ) -> Result<(), FdlError> {
        self.resolve(path, name)?
            .write_to_file(fdl, path, validate, indent)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
