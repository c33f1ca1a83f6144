use serde_json::Value;

use super::record::{
    decode, encode, encode_record, unknown_field, DefaultValue, Field, Record, RecordSchema,
};
use crate::error::FdlError;

/// Major version of the FDL schema this crate writes.
pub const FDL_SCHEMA_MAJOR: u64 = 1;
/// Minor version of the FDL schema this crate writes.
pub const FDL_SCHEMA_MINOR: u64 = 0;

/// Default `fdl_creator` for new documents.
pub const DEFAULT_FDL_CREATOR: &str = "pyfdl";

/// Schema version carried in a document header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Version {
    pub major: Option<u64>,
    pub minor: Option<u64>,
}

fn schema_major() -> Value {
    Value::from(FDL_SCHEMA_MAJOR)
}

fn schema_minor() -> Value {
    Value::from(FDL_SCHEMA_MINOR)
}

static VERSION_SCHEMA: RecordSchema = RecordSchema {
    name: "Version",
    fields: &[Field::value("major"), Field::value("minor")],
    aliases: &[],
    required: &["major", "minor"],
    defaults: &[
        ("major", DefaultValue::Literal(schema_major)),
        ("minor", DefaultValue::Literal(schema_minor)),
    ],
    id_attribute: "",
};

impl Version {
    /// The version this crate writes.
    pub const CURRENT: Version = Version {
        major: Some(FDL_SCHEMA_MAJOR),
        minor: Some(FDL_SCHEMA_MINOR),
    };

    pub const fn new(major: u64, minor: u64) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
        }
    }
}

impl Record for Version {
    fn schema() -> &'static RecordSchema {
        &VERSION_SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "major" => self.major.is_some(),
            "minor" => self.minor.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        match attribute {
            "major" => encode(VERSION_SCHEMA.name, attribute, &self.major),
            "minor" => encode(VERSION_SCHEMA.name, attribute, &self.minor),
            other => Err(unknown_field(VERSION_SCHEMA.name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        match attribute {
            "major" => self.major = Some(decode(VERSION_SCHEMA.name, attribute, value)?),
            "minor" => self.minor = Some(decode(VERSION_SCHEMA.name, attribute, value)?),
            other => return Err(unknown_field(VERSION_SCHEMA.name, other)),
        }
        Ok(())
    }
}

/// Deep-defaulted [`Version`] in mapping form.
pub(crate) fn default_version() -> Result<Value, FdlError> {
    let mut version = Version::default();
    version.apply_defaults()?;
    version.to_mapping().map(Value::Object)
}

pub(crate) fn fresh_uuid() -> Value {
    Value::from(uuid::Uuid::new_v4().to_string())
}

pub(crate) fn default_creator() -> Value {
    Value::from(DEFAULT_FDL_CREATOR)
}

/// Document-level metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    pub uuid: Option<String>,
    pub version: Option<Version>,
    pub fdl_creator: Option<String>,
    /// Id of a framing intent in the same document.
    pub default_framing_intent: Option<String>,
}

static HEADER_SCHEMA: RecordSchema = RecordSchema {
    name: "Header",
    fields: &[
        Field::value("uuid"),
        Field::record("version"),
        Field::value("fdl_creator"),
        Field::value("default_framing_intent"),
    ],
    aliases: &[],
    required: &["uuid", "version"],
    defaults: &[
        ("uuid", DefaultValue::Generate(fresh_uuid)),
        ("version", DefaultValue::Record(default_version)),
        ("fdl_creator", DefaultValue::Literal(default_creator)),
    ],
    id_attribute: "uuid",
};

impl Record for Header {
    fn schema() -> &'static RecordSchema {
        &HEADER_SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "uuid" => self.uuid.is_some(),
            "version" => self.version.is_some(),
            "fdl_creator" => self.fdl_creator.is_some(),
            "default_framing_intent" => self.default_framing_intent.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = HEADER_SCHEMA.name;
        match attribute {
            "uuid" => encode(name, attribute, &self.uuid),
            "version" => encode_record(&self.version),
            "fdl_creator" => encode(name, attribute, &self.fdl_creator),
            "default_framing_intent" => encode(name, attribute, &self.default_framing_intent),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = HEADER_SCHEMA.name;
        match attribute {
            "uuid" => self.uuid = Some(decode(name, attribute, value)?),
            "version" => self.version = Some(Version::from_value(&value)?),
            "fdl_creator" => self.fdl_creator = Some(decode(name, attribute, value)?),
            "default_framing_intent" => {
                self.default_framing_intent = Some(decode(name, attribute, value)?)
            }
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_from_value() {
        let raw = json!({
            "uuid": "0A5E6A2B-0A7E-4A6B-9F2C-6B1D2D0C2E11",
            "version": {"major": 1, "minor": 0},
            "fdl_creator": "ASC FDL Tools",
            "default_framing_intent": "FDLSMP03"
        });
        let header = Header::from_value(&raw).unwrap();
        assert_eq!(header.version, Some(Version::new(1, 0)));
        assert_eq!(header.default_framing_intent.as_deref(), Some("FDLSMP03"));
        assert_eq!(Value::Object(header.to_mapping().unwrap()), raw);
    }

    #[test]
    fn test_header_defaults() {
        let mut header = Header::default();
        assert_eq!(header.check_required(), vec!["uuid", "version"]);

        header.apply_defaults().unwrap();
        assert!(header
            .uuid
            .as_deref()
            .is_some_and(|u| uuid::Uuid::parse_str(u).is_ok()));
        assert_eq!(header.version, Some(Version::CURRENT));
        assert_eq!(header.fdl_creator.as_deref(), Some(DEFAULT_FDL_CREATOR));
        assert!(header.check_required().is_empty());
    }

    #[test]
    fn test_version_minor_zero_is_emitted() {
        let mapping = Version::CURRENT.to_mapping().unwrap();
        assert_eq!(Value::Object(mapping), json!({"major": 1, "minor": 0}));
    }
}
