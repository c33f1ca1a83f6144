//! Handlers: named readers and writers for document file formats.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::debug;

use crate::error::FdlError;
use crate::model::{Fdl, Record};

/// A reader/writer for one document file format.
///
/// The file methods default to reading or writing the whole file through
/// the string methods.
pub trait Handler: Send + Sync {
    /// Name used to look the handler up, e.g. `"fdl"`.
    fn name(&self) -> &str;

    /// File suffixes handled, including the dot.
    fn suffixes(&self) -> &[&str];

    fn read_from_string(&self, s: &str, validate: bool) -> Result<Fdl, FdlError>;

    fn write_to_string(
        &self,
        fdl: &Fdl,
        validate: bool,
        indent: Option<usize>,
    ) -> Result<String, FdlError>;

    fn read_from_file(&self, path: &Path, validate: bool) -> Result<Fdl, FdlError> {
        let raw = std::fs::read_to_string(path)?;
        self.read_from_string(&raw, validate)
    }

    fn write_to_file(
        &self,
        fdl: &Fdl,
        path: &Path,
        validate: bool,
        indent: Option<usize>,
    ) -> Result<(), FdlError> {
        let out = self.write_to_string(fdl, validate, indent)?;
        std::fs::write(path, out)?;
        Ok(())
    }
}

/// The built-in handler for `.fdl` JSON documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct FdlHandler;

impl FdlHandler {
    pub const NAME: &'static str = "fdl";

    fn build(value: &Value, validate: bool) -> Result<Fdl, FdlError> {
        let fdl = Fdl::from_value(value)?;
        if validate {
            fdl.validate()?;
        }
        Ok(fdl)
    }
}

impl Handler for FdlHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn suffixes(&self) -> &[&str] {
        &[".fdl"]
    }

    fn read_from_string(&self, s: &str, validate: bool) -> Result<Fdl, FdlError> {
        let value: Value =
            serde_json::from_str(s).map_err(|source| FdlError::JsonParse { path: None, source })?;
        Self::build(&value, validate)
    }

    /// Parses straight from the file so parse errors name the path.
    fn read_from_file(&self, path: &Path, validate: bool) -> Result<Fdl, FdlError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader).map_err(|source| FdlError::JsonParse {
            path: Some(path.to_path_buf()),
            source,
        })?;

        debug!(path = %path.display(), validate, "reading FDL document");
        Self::build(&value, validate)
    }

    fn write_to_string(
        &self,
        fdl: &Fdl,
        validate: bool,
        indent: Option<usize>,
    ) -> Result<String, FdlError> {
        if validate {
            fdl.validate()?;
        }
        let mapping = fdl.to_mapping()?;

        let result = match indent {
            None => serde_json::to_vec(&mapping),
            Some(width) => {
                let spaces = " ".repeat(width);
                let mut buf = Vec::new();
                let mut ser =
                    Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(spaces.as_bytes()));
                serde::Serialize::serialize(&mapping, &mut ser).map(|()| buf)
            }
        };
        let bytes = result.map_err(|source| FdlError::JsonWrite { path: None, source })?;

        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_to_file(
        &self,
        fdl: &Fdl,
        path: &Path,
        validate: bool,
        indent: Option<usize>,
    ) -> Result<(), FdlError> {
        let out = self.write_to_string(fdl, validate, indent)?;
        std::fs::write(path, out)?;
        debug!(path = %path.display(), validate, "wrote FDL document");
        Ok(())
    }
}
