use serde_json::Value;

use super::canvas::Canvas;
use super::collection::TypedCollection;
use super::record::{decode, encode, unknown_field, Field, Record, RecordSchema};
use crate::error::FdlError;

/// A group of canvases sharing a shooting or creative context.
///
/// Contexts are keyed by `label` in typed collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    pub label: Option<String>,
    pub context_creator: Option<String>,
    pub canvases: TypedCollection<Canvas>,
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "Context",
    fields: &[
        Field::value("label"),
        Field::value("context_creator"),
        Field::collection("canvases"),
    ],
    aliases: &[],
    required: &[],
    defaults: &[],
    id_attribute: "label",
};

impl Context {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

impl Record for Context {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "label" => self.label.is_some(),
            "context_creator" => self.context_creator.is_some(),
            "canvases" => true,
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        match attribute {
            "label" => encode(SCHEMA.name, attribute, &self.label),
            "context_creator" => encode(SCHEMA.name, attribute, &self.context_creator),
            "canvases" => self.canvases.to_list().map(Some),
            other => Err(unknown_field(SCHEMA.name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        match attribute {
            "label" => self.label = Some(decode(SCHEMA.name, attribute, value)?),
            "context_creator" => self.context_creator = Some(decode(SCHEMA.name, attribute, value)?),
            "canvases" => self.canvases = TypedCollection::from_value(SCHEMA.name, attribute, value)?,
            other => return Err(unknown_field(SCHEMA.name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
