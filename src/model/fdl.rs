use serde_json::Value;

use super::canvas_template::CanvasTemplate;
use super::collection::TypedCollection;
use super::context::Context;
use super::framing_intent::FramingIntent;
use super::header::{
    default_creator, default_version, fresh_uuid, Header, Version, DEFAULT_FDL_CREATOR,
};
use super::record::{
    decode, encode, encode_record, unknown_field, DefaultValue, Field, Record, RecordSchema,
};
use crate::error::FdlError;

/// The root of a Framing Decision List document.
///
/// Header fields live directly on the document; [`Fdl::header`] and
/// [`Fdl::set_header`] copy them out and in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fdl {
    pub uuid: Option<String>,
    pub version: Option<Version>,
    pub fdl_creator: Option<String>,
    pub default_framing_intent: Option<String>,
    pub framing_intents: TypedCollection<FramingIntent>,
    pub contexts: TypedCollection<Context>,
    pub canvas_templates: TypedCollection<CanvasTemplate>,
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "Fdl",
    fields: &[
        Field::value("uuid"),
        Field::record("version"),
        Field::value("fdl_creator"),
        Field::value("default_framing_intent"),
        Field::collection("framing_intents"),
        Field::collection("contexts"),
        Field::collection("canvas_templates"),
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

impl Fdl {
    /// An empty document with every field unset. Use
    /// [`Record::apply_defaults`] or [`Fdl::with_defaults`] to fill the
    /// header.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document with a fresh uuid, the current schema version and
    /// the default creator.
    pub fn with_defaults() -> Self {
        Self {
            uuid: Some(uuid::Uuid::new_v4().to_string()),
            version: Some(Version::CURRENT),
            fdl_creator: Some(DEFAULT_FDL_CREATOR.to_string()),
            ..Default::default()
        }
    }

    pub fn header(&self) -> Header {
        Header {
            uuid: self.uuid.clone(),
            version: self.version,
            fdl_creator: self.fdl_creator.clone(),
            default_framing_intent: self.default_framing_intent.clone(),
        }
    }

    pub fn set_header(&mut self, header: Header) {
        self.uuid = header.uuid;
        self.version = header.version;
        self.fdl_creator = header.fdl_creator;
        self.default_framing_intent = header.default_framing_intent;
    }

    /// Checks relations between entities, required fields and the schema of
    /// the document's version, reporting every finding at once.
    ///
    /// # Errors
    /// Returns [`FdlError::ValidationFailed`] carrying the full report if any
    /// error-level issue was found.
    pub fn validate(&self) -> Result<(), FdlError> {
        crate::validation::validate_fdl(self).into_result()
    }
}

impl Record for Fdl {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "uuid" => self.uuid.is_some(),
            "version" => self.version.is_some(),
            "fdl_creator" => self.fdl_creator.is_some(),
            "default_framing_intent" => self.default_framing_intent.is_some(),
            "framing_intents" | "contexts" | "canvas_templates" => true,
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "uuid" => encode(name, attribute, &self.uuid),
            "version" => encode_record(&self.version),
            "fdl_creator" => encode(name, attribute, &self.fdl_creator),
            "default_framing_intent" => encode(name, attribute, &self.default_framing_intent),
            "framing_intents" => self.framing_intents.to_list().map(Some),
            "contexts" => self.contexts.to_list().map(Some),
            "canvas_templates" => self.canvas_templates.to_list().map(Some),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "uuid" => self.uuid = Some(decode(name, attribute, value)?),
            "version" => self.version = Some(Version::from_value(&value)?),
            "fdl_creator" => self.fdl_creator = Some(decode(name, attribute, value)?),
            "default_framing_intent" => {
                self.default_framing_intent = Some(decode(name, attribute, value)?)
            }
            "framing_intents" => {
                self.framing_intents = TypedCollection::from_value(name, attribute, value)?
            }
            "contexts" => self.contexts = TypedCollection::from_value(name, attribute, value)?,
            "canvas_templates" => {
                self.canvas_templates = TypedCollection::from_value(name, attribute, value)?
            }
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref()
    }
}
