use serde_json::Value;

use super::geometry::{Dimensions, NumericKind};
use super::record::{
    decode, decode_integral, encode, unknown_field, DefaultValue, Field, Record, RecordSchema,
};
use crate::error::FdlError;

/// A desired crop ratio plus a protective border fraction, independent of
/// any particular canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramingIntent {
    pub id: Option<String>,
    pub label: Option<String>,
    /// Always emitted as integers.
    pub aspect_ratio: Option<Dimensions>,
    /// Fraction of the fitted rectangle reserved as protection, e.g. `0.088`.
    pub protection: Option<f64>,
}

fn zero() -> Value {
    Value::from(0)
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "FramingIntent",
    fields: &[
        Field::value("id"),
        Field::value("label"),
        Field::value("aspect_ratio"),
        Field::value("protection"),
    ],
    aliases: &[],
    required: &["id", "aspect_ratio"],
    defaults: &[("protection", DefaultValue::Literal(zero))],
    id_attribute: "id",
};

impl FramingIntent {
    pub fn new(id: impl Into<String>, aspect_ratio: Dimensions) -> Self {
        Self {
            id: Some(id.into()),
            aspect_ratio: Some(aspect_ratio.with_kind(NumericKind::Integral)),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_protection(mut self, protection: f64) -> Self {
        self.protection = Some(protection);
        self
    }
}

impl Record for FramingIntent {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "id" => self.id.is_some(),
            "label" => self.label.is_some(),
            "aspect_ratio" => self.aspect_ratio.is_some(),
            "protection" => self.protection.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        match attribute {
            "id" => encode(SCHEMA.name, attribute, &self.id),
            "label" => encode(SCHEMA.name, attribute, &self.label),
            "aspect_ratio" => encode(
                SCHEMA.name,
                attribute,
                &self.aspect_ratio.map(|d| d.with_kind(NumericKind::Integral)),
            ),
            "protection" => encode(SCHEMA.name, attribute, &self.protection),
            other => Err(unknown_field(SCHEMA.name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        match attribute {
            "id" => self.id = Some(decode(SCHEMA.name, attribute, value)?),
            "label" => self.label = Some(decode(SCHEMA.name, attribute, value)?),
            "aspect_ratio" => {
                self.aspect_ratio = Some(decode_integral(SCHEMA.name, attribute, value)?)
            }
            "protection" => self.protection = Some(decode(SCHEMA.name, attribute, value)?),
            other => return Err(unknown_field(SCHEMA.name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
