//! The record framework every FDL entity implements.
//!
//! A record describes itself with a static [`RecordSchema`]: the ordered FDL
//! keys it emits, which of them hold nested records or typed collections, an
//! alias table for keys whose Rust attribute name differs, the required keys
//! (including dotted `"a.b"` pairs meaning "b is required when a is set") and
//! a table of defaults. The provided methods of [`Record`] use that schema to
//! check required fields, apply defaults and convert to and from the
//! JSON-object ("mapping") form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::geometry::{Dimensions, NumericKind};
use crate::error::FdlError;

/// The mapping form of a record: an ordered JSON object.
pub type Mapping = Map<String, Value>;

/// How a field's value is typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar or plain value type (string, number, dimensions, point).
    Value,
    /// A nested record.
    Record,
    /// A [`TypedCollection`](super::TypedCollection) of records.
    Collection,
}

/// One enumerated field of a record.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub key: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn value(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Value,
        }
    }

    pub const fn record(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Record,
        }
    }

    pub const fn collection(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Collection,
        }
    }
}

/// Where a default value comes from.
#[derive(Clone, Copy, Debug)]
pub enum DefaultValue {
    /// A fresh value from a generator, e.g. a new uuid.
    Generate(fn() -> Value),
    /// The mapping of a nested record with its own defaults applied.
    Record(fn() -> Result<Value, FdlError>),
    /// A copy of another attribute of the same record.
    CopyOf(&'static str),
    /// A fixed value.
    Literal(fn() -> Value),
}

/// Static description of a record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Record type name used in error messages.
    pub name: &'static str,
    /// Enumerated FDL keys, in emission order.
    pub fields: &'static [Field],
    /// FDL key to Rust attribute name, for keys that differ.
    pub aliases: &'static [(&'static str, &'static str)],
    /// Required keys; `"a.b"` requires `b` only when `a` is set.
    pub required: &'static [&'static str],
    /// Defaults applied by [`Record::apply_defaults`], in order.
    pub defaults: &'static [(&'static str, DefaultValue)],
    /// Key holding the identifier used by typed collections.
    pub id_attribute: &'static str,
}

impl RecordSchema {
    /// Maps an FDL key to the Rust attribute name.
    pub fn attribute<'a>(&self, key: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(alias_key, _)| *alias_key == key)
            .map(|(_, attribute)| *attribute)
            .unwrap_or(key)
    }

    /// Looks up a field by FDL key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn is_plain_required(&self, key: &str) -> bool {
        self.required.iter().any(|r| *r == key)
    }

    fn dotted_pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.required.iter().copied().filter_map(|r| r.split_once('.'))
    }
}

/// The reflective contract shared by all FDL entities.
///
/// Implementors supply the schema and three per-attribute accessors; the
/// remaining behavior is provided.
pub trait Record: Default + Sized {
    fn schema() -> &'static RecordSchema;

    /// True if the attribute currently holds a value.
    fn is_set(&self, attribute: &str) -> bool;

    /// Returns the attribute's mapping value, `None` if unset.
    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError>;

    /// Assigns the attribute from its mapping value, checking its shape.
    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError>;

    /// The identifier used as key in typed collections.
    fn identifier(&self) -> Option<&str> {
        None
    }

    /// Ordered list of FDL keys.
    fn enumerated_fields() -> Vec<&'static str> {
        Self::schema().fields.iter().map(|f| f.key).collect()
    }

    /// Returns the required keys that are missing.
    ///
    /// A dotted pair `"a.b"` reports `b` only when `a` is set.
    fn check_required(&self) -> Vec<String> {
        let schema = Self::schema();
        let mut missing = Vec::new();

        for required in schema.required {
            match required.split_once('.') {
                Some((condition, dependent)) => {
                    if self.is_set(schema.attribute(condition))
                        && !self.is_set(schema.attribute(dependent))
                    {
                        missing.push(dependent.to_string());
                    }
                }
                None => {
                    if !self.is_set(schema.attribute(required)) {
                        missing.push(required.to_string());
                    }
                }
            }
        }

        missing
    }

    /// True if `key` must be emitted even when empty: plainly required, or
    /// the dependent side of a dotted pair whose condition is set.
    fn is_required(&self, key: &str) -> bool {
        let schema = Self::schema();
        schema.is_plain_required(key)
            || schema
                .dotted_pairs()
                .any(|(condition, dependent)| {
                    dependent == key && self.is_set(schema.attribute(condition))
                })
    }

    /// Fills every unset attribute that has a default.
    fn apply_defaults(&mut self) -> Result<(), FdlError> {
        let schema = Self::schema();

        for (key, default) in schema.defaults {
            let attribute = schema.attribute(key);
            if self.is_set(attribute) {
                continue;
            }

            let value = match default {
                DefaultValue::Generate(generate) => Some(generate()),
                DefaultValue::Literal(literal) => Some(literal()),
                DefaultValue::Record(build) => Some(build()?),
                DefaultValue::CopyOf(other) => self.get_field(schema.attribute(other))?,
            };

            if let Some(value) = value {
                self.set_field(attribute, value)?;
            }
        }

        Ok(())
    }

    /// Converts the record into its mapping form.
    ///
    /// Non-required empty values (null, `""`, `0`, `false`, empty array or
    /// object) are omitted. Typed collections are always emitted.
    ///
    /// # Errors
    /// Returns [`FdlError::MissingRequired`] if required fields are missing.
    fn to_mapping(&self) -> Result<Mapping, FdlError> {
        let schema = Self::schema();

        let missing = self.check_required();
        if !missing.is_empty() {
            return Err(FdlError::MissingRequired {
                record: schema.name,
                missing,
            });
        }

        let mut data = Mapping::new();
        for field in schema.fields {
            let Some(value) = self.get_field(schema.attribute(field.key))? else {
                continue;
            };

            if field.kind != FieldKind::Collection
                && is_empty_value(&value)
                && !self.is_required(field.key)
            {
                continue;
            }

            data.insert(field.key.to_string(), value);
        }

        Ok(data)
    }

    /// Builds a record from its mapping form. Unknown keys are ignored and
    /// defaults are not applied.
    fn from_mapping(raw: &Mapping) -> Result<Self, FdlError> {
        let schema = Self::schema();
        let mut record = Self::default();

        for field in schema.fields {
            match raw.get(field.key) {
                None | Some(Value::Null) => continue,
                Some(value) => record.set_field(schema.attribute(field.key), value.clone())?,
            }
        }

        Ok(record)
    }

    /// Like [`Record::from_mapping`], for a value that must be an object.
    fn from_value(raw: &Value) -> Result<Self, FdlError> {
        match raw {
            Value::Object(map) => Self::from_mapping(map),
            other => Err(FdlError::Shape {
                record: Self::schema().name,
                field: String::new(),
                message: format!("expected an object, found {}", value_type_name(other)),
            }),
        }
    }
}

/// Falsy test used when omitting optional fields.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializes an optional plain value.
pub(crate) fn encode<T: Serialize>(
    record: &'static str,
    field: &str,
    value: &Option<T>,
) -> Result<Option<Value>, FdlError> {
    value
        .as_ref()
        .map(|v| {
            serde_json::to_value(v).map_err(|e| FdlError::Shape {
                record,
                field: field.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

/// Serializes an optional nested record.
pub(crate) fn encode_record<R: Record>(value: &Option<R>) -> Result<Option<Value>, FdlError> {
    value
        .as_ref()
        .map(|r| r.to_mapping().map(Value::Object))
        .transpose()
}

/// Deserializes a plain value, reporting a shape error on mismatch.
pub(crate) fn decode<T: DeserializeOwned>(
    record: &'static str,
    field: &str,
    value: Value,
) -> Result<T, FdlError> {
    serde_json::from_value(value).map_err(|e| FdlError::Shape {
        record,
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Deserializes dimensions stored in an integral field, rejecting values
/// that are not whole numbers.
pub(crate) fn decode_integral(
    record: &'static str,
    field: &str,
    value: Value,
) -> Result<Dimensions, FdlError> {
    let dims: Dimensions = decode(record, field, value)?;
    if !dims.is_whole() {
        return Err(FdlError::Shape {
            record,
            field: field.to_string(),
            message: format!(
                "expected whole numbers, found {}x{}",
                dims.width, dims.height
            ),
        });
    }
    Ok(dims.with_kind(NumericKind::Integral))
}

/// Parses an option-set string, surfacing [`FdlError::InvalidOption`].
pub(crate) fn decode_option<T>(record: &'static str, field: &str, value: Value) -> Result<T, FdlError>
where
    T: std::str::FromStr<Err = FdlError>,
{
    match value {
        Value::String(s) => s.parse(),
        other => Err(FdlError::Shape {
            record,
            field: field.to_string(),
            message: format!("expected a string, found {}", value_type_name(&other)),
        }),
    }
}

pub(crate) fn unknown_field(record: &'static str, field: &str) -> FdlError {
    FdlError::Shape {
        record,
        field: field.to_string(),
        message: "unknown attribute".to_string(),
    }
}
