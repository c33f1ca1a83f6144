//! Rounding rules for converting real-valued dimensions to whole numbers.
//!
//! There is no process-wide rounding state: every dimension-producing
//! operation takes the [`RoundStrategy`] to apply as an argument.

use serde_json::Value;

use super::geometry::Dimensions;
use super::options::{Direction, Evenness};
use super::record::{
    decode_option, encode, unknown_field, DefaultValue, Field, Record, RecordSchema,
};
use crate::error::FdlError;

/// Strategy used by the fitting engine unless the caller supplies another.
pub const DEFAULT_ROUNDING_STRATEGY: RoundStrategy = RoundStrategy {
    evenness: Some(Evenness::Even),
    direction: Some(Direction::Round),
};

/// Leaves values untouched.
pub const NO_ROUNDING: RoundStrategy = RoundStrategy {
    evenness: None,
    direction: None,
};

/// How to round dimensions, e.g. when applying a canvas template.
///
/// In FDL documents this is the `round` object with keys `even` and `mode`.
/// An unset direction disables rounding entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStrategy {
    pub evenness: Option<Evenness>,
    pub direction: Option<Direction>,
}

fn default_even() -> Value {
    Value::from(Evenness::Even.as_str())
}

fn default_mode() -> Value {
    Value::from(Direction::Up.as_str())
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "RoundStrategy",
    fields: &[Field::value("even"), Field::value("mode")],
    aliases: &[("even", "evenness"), ("mode", "direction")],
    required: &["even", "mode"],
    defaults: &[
        ("even", DefaultValue::Literal(default_even)),
        ("mode", DefaultValue::Literal(default_mode)),
    ],
    id_attribute: "",
};

impl RoundStrategy {
    pub const fn new(evenness: Evenness, direction: Direction) -> Self {
        Self {
            evenness: Some(evenness),
            direction: Some(direction),
        }
    }

    /// Rounds both axes independently.
    ///
    /// The direction function (`ceil`, `floor` or nearest) is applied to the
    /// value directly for `whole`, or to half the value and then doubled for
    /// `even`, so even results keep the same directional bias. The result
    /// keeps the input's representation.
    pub fn round_dimensions(&self, dimensions: &Dimensions) -> Dimensions {
        let Some(direction) = self.direction else {
            return *dimensions;
        };

        let adjust = match self.evenness {
            Some(Evenness::Even) => 2.0,
            Some(Evenness::Whole) | None => 1.0,
        };

        Dimensions {
            width: round_value(dimensions.width / adjust, direction) * adjust,
            height: round_value(dimensions.height / adjust, direction) * adjust,
            kind: dimensions.kind,
        }
    }
}

fn round_value(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Up => value.ceil(),
        Direction::Down => value.floor(),
        Direction::Round => value.round_ties_even(),
    }
}

impl Record for RoundStrategy {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "evenness" => self.evenness.is_some(),
            "direction" => self.direction.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        match attribute {
            "evenness" => encode(SCHEMA.name, "even", &self.evenness),
            "direction" => encode(SCHEMA.name, "mode", &self.direction),
            other => Err(unknown_field(SCHEMA.name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        match attribute {
            "evenness" => self.evenness = Some(decode_option(SCHEMA.name, "even", value)?),
            "direction" => self.direction = Some(decode_option(SCHEMA.name, "mode", value)?),
            other => return Err(unknown_field(SCHEMA.name, other)),
        }
        Ok(())
    }
}
