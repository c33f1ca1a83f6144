use serde_json::Value;

use super::collection::TypedCollection;
use super::framing_decision::FramingDecision;
use super::geometry::{Dimensions, NumericKind, Point};
use super::record::{
    decode, decode_integral, encode, unknown_field, DefaultValue, Field, Record, RecordSchema,
};
use crate::error::FdlError;

/// One full sensor or photosite image region and the framing decisions
/// placed within it.
///
/// `dimensions`, `effective_dimensions` and `photosite_dimensions` are
/// integral; `physical_dimensions` is real-valued (millimetres).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Canvas {
    pub label: Option<String>,
    pub id: Option<String>,
    /// Id of the canvas this one was derived from, or its own id.
    pub source_canvas_id: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub effective_dimensions: Option<Dimensions>,
    pub effective_anchor_point: Option<Point>,
    pub photosite_dimensions: Option<Dimensions>,
    pub physical_dimensions: Option<Dimensions>,
    pub anamorphic_squeeze: Option<f64>,
    pub framing_decisions: TypedCollection<FramingDecision>,
}

fn unit_squeeze() -> Value {
    Value::from(1.0)
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "Canvas",
    fields: &[
        Field::value("label"),
        Field::value("id"),
        Field::value("source_canvas_id"),
        Field::value("dimensions"),
        Field::value("effective_dimensions"),
        Field::value("effective_anchor_point"),
        Field::value("photosite_dimensions"),
        Field::value("physical_dimensions"),
        Field::value("anamorphic_squeeze"),
        Field::collection("framing_decisions"),
    ],
    aliases: &[],
    required: &[
        "id",
        "source_canvas_id",
        "dimensions",
        "effective_dimensions.effective_anchor_point",
    ],
    defaults: &[
        ("source_canvas_id", DefaultValue::CopyOf("id")),
        ("anamorphic_squeeze", DefaultValue::Literal(unit_squeeze)),
    ],
    id_attribute: "id",
};

fn integral(dims: Option<Dimensions>) -> Option<Dimensions> {
    dims.map(|d| d.with_kind(NumericKind::Integral))
}

impl Canvas {
    /// A canvas of the given size whose source is itself.
    pub fn new(id: impl Into<String>, dimensions: Dimensions) -> Self {
        let id = id.into();
        Self {
            source_canvas_id: Some(id.clone()),
            id: Some(id),
            dimensions: Some(dimensions.with_kind(NumericKind::Integral)),
            ..Default::default()
        }
    }

    /// Sets the effective region and its anchor together.
    pub fn with_effective(mut self, dimensions: Dimensions, anchor: Point) -> Self {
        self.effective_dimensions = Some(dimensions.with_kind(NumericKind::Integral));
        self.effective_anchor_point = Some(anchor);
        self
    }

    pub fn with_squeeze(mut self, squeeze: f64) -> Self {
        self.anamorphic_squeeze = Some(squeeze);
        self
    }

    /// The rectangle framing decisions are placed in: the effective region
    /// with its anchor when set, else the full canvas at the origin.
    pub fn active_geometry(&self) -> Result<(Dimensions, Point), FdlError> {
        if let Some(effective) = self.effective_dimensions {
            return Ok((
                effective,
                self.effective_anchor_point.unwrap_or(Point::ORIGIN),
            ));
        }

        match self.dimensions {
            Some(dimensions) => Ok((dimensions, Point::ORIGIN)),
            None => Err(FdlError::Fit(format!(
                "canvas {:?} has no dimensions",
                self.id.as_deref().unwrap_or_default()
            ))),
        }
    }

    /// Anamorphic squeeze, `1.0` when unset.
    pub fn squeeze(&self) -> f64 {
        self.anamorphic_squeeze.unwrap_or(1.0)
    }
}

impl Record for Canvas {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "label" => self.label.is_some(),
            "id" => self.id.is_some(),
            "source_canvas_id" => self.source_canvas_id.is_some(),
            "dimensions" => self.dimensions.is_some(),
            "effective_dimensions" => self.effective_dimensions.is_some(),
            "effective_anchor_point" => self.effective_anchor_point.is_some(),
            "photosite_dimensions" => self.photosite_dimensions.is_some(),
            "physical_dimensions" => self.physical_dimensions.is_some(),
            "anamorphic_squeeze" => self.anamorphic_squeeze.is_some(),
            "framing_decisions" => true,
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => encode(name, attribute, &self.label),
            "id" => encode(name, attribute, &self.id),
            "source_canvas_id" => encode(name, attribute, &self.source_canvas_id),
            "dimensions" => encode(name, attribute, &integral(self.dimensions)),
            "effective_dimensions" => encode(name, attribute, &integral(self.effective_dimensions)),
            "effective_anchor_point" => encode(name, attribute, &self.effective_anchor_point),
            "photosite_dimensions" => encode(name, attribute, &integral(self.photosite_dimensions)),
            "physical_dimensions" => encode(name, attribute, &self.physical_dimensions),
            "anamorphic_squeeze" => encode(name, attribute, &self.anamorphic_squeeze),
            "framing_decisions" => self.framing_decisions.to_list().map(Some),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => self.label = Some(decode(name, attribute, value)?),
            "id" => self.id = Some(decode(name, attribute, value)?),
            "source_canvas_id" => self.source_canvas_id = Some(decode(name, attribute, value)?),
            "dimensions" => self.dimensions = Some(decode_integral(name, attribute, value)?),
            "effective_dimensions" => {
                self.effective_dimensions = Some(decode_integral(name, attribute, value)?)
            }
            "effective_anchor_point" => {
                self.effective_anchor_point = Some(decode(name, attribute, value)?)
            }
            "photosite_dimensions" => {
                self.photosite_dimensions = Some(decode_integral(name, attribute, value)?)
            }
            "physical_dimensions" => {
                self.physical_dimensions = Some(decode(name, attribute, value)?)
            }
            "anamorphic_squeeze" => self.anamorphic_squeeze = Some(decode(name, attribute, value)?),
            "framing_decisions" => {
                self.framing_decisions = TypedCollection::from_value(name, attribute, value)?
            }
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
