use serde_json::Value;

use super::canvas::Canvas;
use super::geometry::{Dimensions, Point};
use super::options::{AlignmentHorizontal, AlignmentVertical};
use super::record::{decode, encode, unknown_field, Field, Record, RecordSchema};
use crate::error::FdlError;

/// The realized rectangle and offset of a framing intent inside a canvas.
///
/// Dimensions here are real-valued; anchors are relative to the canvas
/// origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramingDecision {
    pub label: Option<String>,
    pub id: Option<String>,
    pub framing_intent_id: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub anchor_point: Option<Point>,
    pub protection_dimensions: Option<Dimensions>,
    pub protection_anchor_point: Option<Point>,
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "FramingDecision",
    fields: &[
        Field::value("label"),
        Field::value("id"),
        Field::value("framing_intent_id"),
        Field::value("dimensions"),
        Field::value("anchor_point"),
        Field::value("protection_dimensions"),
        Field::value("protection_anchor_point"),
    ],
    aliases: &[],
    required: &["id", "framing_intent_id", "dimensions", "anchor_point"],
    defaults: &[],
    id_attribute: "id",
};

impl FramingDecision {
    /// Places `protection_anchor_point` inside the canvas's active rectangle
    /// using the given alignment. Does nothing without protection dimensions.
    pub fn adjust_protection_anchor_point(
        &mut self,
        canvas: &Canvas,
        horizontal: AlignmentHorizontal,
        vertical: AlignmentVertical,
    ) -> Result<(), FdlError> {
        let Some(protection) = self.protection_dimensions else {
            return Ok(());
        };

        let (active, anchor) = canvas.active_geometry()?;
        self.protection_anchor_point = Some(Point::new(
            anchor.x + (active.width - protection.width) * horizontal.factor(),
            anchor.y + (active.height - protection.height) * vertical.factor(),
        ));
        Ok(())
    }

    /// Places `anchor_point`.
    ///
    /// With a protection anchor the decision is centered in the protection
    /// rectangle and the alignment arguments are ignored. Otherwise it is
    /// aligned inside the canvas's active rectangle.
    pub fn adjust_anchor_point(
        &mut self,
        canvas: &Canvas,
        horizontal: AlignmentHorizontal,
        vertical: AlignmentVertical,
    ) -> Result<(), FdlError> {
        let dimensions = self.dimensions.ok_or_else(|| {
            FdlError::Fit("framing decision has no dimensions to anchor".to_string())
        })?;

        if let (Some(protection_anchor), Some(protection)) =
            (self.protection_anchor_point, self.protection_dimensions)
        {
            self.anchor_point = Some(Point::new(
                protection_anchor.x + (protection.width - dimensions.width) / 2.0,
                protection_anchor.y + (protection.height - dimensions.height) / 2.0,
            ));
            return Ok(());
        }

        let (active, anchor) = canvas.active_geometry()?;
        self.anchor_point = Some(Point::new(
            anchor.x + (active.width - dimensions.width) * horizontal.factor(),
            anchor.y + (active.height - dimensions.height) * vertical.factor(),
        ));
        Ok(())
    }
}

impl Record for FramingDecision {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "label" => self.label.is_some(),
            "id" => self.id.is_some(),
            "framing_intent_id" => self.framing_intent_id.is_some(),
            "dimensions" => self.dimensions.is_some(),
            "anchor_point" => self.anchor_point.is_some(),
            "protection_dimensions" => self.protection_dimensions.is_some(),
            "protection_anchor_point" => self.protection_anchor_point.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => encode(name, attribute, &self.label),
            "id" => encode(name, attribute, &self.id),
            "framing_intent_id" => encode(name, attribute, &self.framing_intent_id),
            "dimensions" => encode(name, attribute, &self.dimensions),
            "anchor_point" => encode(name, attribute, &self.anchor_point),
            "protection_dimensions" => encode(name, attribute, &self.protection_dimensions),
            "protection_anchor_point" => encode(name, attribute, &self.protection_anchor_point),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => self.label = Some(decode(name, attribute, value)?),
            "id" => self.id = Some(decode(name, attribute, value)?),
            "framing_intent_id" => self.framing_intent_id = Some(decode(name, attribute, value)?),
            "dimensions" => self.dimensions = Some(decode(name, attribute, value)?),
            "anchor_point" => self.anchor_point = Some(decode(name, attribute, value)?),
            "protection_dimensions" => {
                self.protection_dimensions = Some(decode(name, attribute, value)?)
            }
            "protection_anchor_point" => {
                self.protection_anchor_point = Some(decode(name, attribute, value)?)
            }
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
