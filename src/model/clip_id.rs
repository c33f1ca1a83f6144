//! Clip identification: a clip name plus either a single file or a numbered
//! file sequence.

use serde_json::Value;

use super::record::{decode, encode, encode_record, unknown_field, Field, Record, RecordSchema};
use crate::error::FdlError;

/// A numbered file sequence such as `A002_C307_0523JT.####.exr`.
///
/// `idx` is the placeholder character standing in for frame digits. The
/// frame bounds can't be negative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSequence {
    pub value: Option<String>,
    pub idx: Option<String>,
    min: Option<i64>,
    max: Option<i64>,
}

static FILE_SEQUENCE_SCHEMA: RecordSchema = RecordSchema {
    name: "FileSequence",
    fields: &[
        Field::value("value"),
        Field::value("idx"),
        Field::value("min"),
        Field::value("max"),
    ],
    aliases: &[("min", "min_"), ("max", "max_")],
    required: &["value", "idx", "min", "max"],
    defaults: &[],
    id_attribute: "",
};

fn frame_bound(field: &str, value: i64) -> Result<i64, FdlError> {
    if value < 0 {
        return Err(FdlError::InvalidValue {
            record: FILE_SEQUENCE_SCHEMA.name,
            field: field.to_string(),
            message: "Sequences do not allow negative values".to_string(),
        });
    }
    Ok(value)
}

impl FileSequence {
    pub fn new(
        value: impl Into<String>,
        idx: impl Into<String>,
        min: i64,
        max: i64,
    ) -> Result<Self, FdlError> {
        let mut sequence = Self {
            value: Some(value.into()),
            idx: Some(idx.into()),
            ..Default::default()
        };
        sequence.set_min(min)?;
        sequence.set_max(max)?;
        Ok(sequence)
    }

    /// First frame number.
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    /// Last frame number.
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn set_min(&mut self, min: i64) -> Result<(), FdlError> {
        self.min = Some(frame_bound("min", min)?);
        Ok(())
    }

    pub fn set_max(&mut self, max: i64) -> Result<(), FdlError> {
        self.max = Some(frame_bound("max", max)?);
        Ok(())
    }
}

impl Record for FileSequence {
    fn schema() -> &'static RecordSchema {
        &FILE_SEQUENCE_SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "value" => self.value.is_some(),
            "idx" => self.idx.is_some(),
            "min_" => self.min.is_some(),
            "max_" => self.max.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = FILE_SEQUENCE_SCHEMA.name;
        match attribute {
            "value" => encode(name, attribute, &self.value),
            "idx" => encode(name, attribute, &self.idx),
            "min_" => encode(name, "min", &self.min),
            "max_" => encode(name, "max", &self.max),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = FILE_SEQUENCE_SCHEMA.name;
        match attribute {
            "value" => self.value = Some(decode(name, attribute, value)?),
            "idx" => self.idx = Some(decode(name, attribute, value)?),
            "min_" => self.set_min(decode(name, "min", value)?)?,
            "max_" => self.set_max(decode(name, "max", value)?)?,
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }
}

/// Identifies the clip a document was made for.
///
/// A clip is named by `clip_name` and optionally pinned to either one `file`
/// or a `sequence`, never both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipId {
    pub clip_name: Option<String>,
    file: Option<String>,
    sequence: Option<FileSequence>,
}

static CLIP_ID_SCHEMA: RecordSchema = RecordSchema {
    name: "ClipID",
    fields: &[
        Field::value("clip_name"),
        Field::value("file"),
        Field::record("sequence"),
    ],
    aliases: &[],
    required: &["clip_name"],
    defaults: &[],
    id_attribute: "",
};

impl ClipId {
    pub fn new(clip_name: impl Into<String>) -> Self {
        Self {
            clip_name: Some(clip_name.into()),
            ..Default::default()
        }
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn sequence(&self) -> Option<&FileSequence> {
        self.sequence.as_ref()
    }

    /// Sets or clears the clip's file.
    ///
    /// # Errors
    /// Fails if a sequence is already set.
    pub fn set_file(&mut self, file: Option<String>) -> Result<(), FdlError> {
        if file.is_some() && self.sequence.is_some() {
            return Err(FdlError::InvalidValue {
                record: CLIP_ID_SCHEMA.name,
                field: "file".to_string(),
                message: "A sequence is already provided. You may only have file OR sequence as an identifier".to_string(),
            });
        }
        self.file = file;
        Ok(())
    }

    /// Sets or clears the clip's file sequence.
    ///
    /// # Errors
    /// Fails if a file is already set.
    pub fn set_sequence(&mut self, sequence: Option<FileSequence>) -> Result<(), FdlError> {
        if sequence.is_some() && self.file.is_some() {
            return Err(FdlError::InvalidValue {
                record: CLIP_ID_SCHEMA.name,
                field: "sequence".to_string(),
                message: "A file is already provided. You may only have file OR sequence as an identifier".to_string(),
            });
        }
        self.sequence = sequence;
        Ok(())
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Result<Self, FdlError> {
        self.set_file(Some(file.into()))?;
        Ok(self)
    }

    pub fn with_sequence(mut self, sequence: FileSequence) -> Result<Self, FdlError> {
        self.set_sequence(Some(sequence))?;
        Ok(self)
    }
}

impl Record for ClipId {
    fn schema() -> &'static RecordSchema {
        &CLIP_ID_SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "clip_name" => self.clip_name.is_some(),
            "file" => self.file.is_some(),
            "sequence" => self.sequence.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = CLIP_ID_SCHEMA.name;
        match attribute {
            "clip_name" => encode(name, attribute, &self.clip_name),
            "file" => encode(name, attribute, &self.file),
            "sequence" => encode_record(&self.sequence),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = CLIP_ID_SCHEMA.name;
        match attribute {
            "clip_name" => self.clip_name = Some(decode(name, attribute, value)?),
            "file" => self.set_file(Some(decode(name, attribute, value)?))?,
            "sequence" => self.set_sequence(Some(FileSequence::from_value(&value)?))?,
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }
}
