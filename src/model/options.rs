//! Closed option sets used by rounding rules and canvas templates.
//!
//! Every option parses from (and prints as) its FDL string value. Parsing an
//! unknown value fails with [`FdlError::InvalidOption`], naming the field
//! and listing the accepted values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FdlError;

macro_rules! fdl_option {
    (
        $(#[$meta:meta])*
        $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// FDL attribute name this option set belongs to.
            pub const FIELD: &'static str = $field;

            /// All accepted string values, in declaration order.
            pub const OPTIONS: &'static [&'static str] = &[$($value),+];

            /// Returns the FDL string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = FdlError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    other => Err(FdlError::InvalidOption {
                        field: $field,
                        value: other.to_string(),
                        options: Self::OPTIONS,
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fdl_option! {
    /// Whether rounded values snap to any whole number or to even numbers.
    Evenness as "even" {
        Even => "even",
        Whole => "whole",
    }
}

fdl_option! {
    /// Rounding direction.
    Direction as "mode" {
        Up => "up",
        Down => "down",
        /// Nearest integer, ties to even.
        Round => "round",
    }
}

fdl_option! {
    /// Source rectangle that drives scaling when applying a canvas template.
    FitSource as "fit_source" {
        FramingDecisionDimensions => "framing_decision.dimensions",
        FramingDecisionProtectionDimensions => "framing_decision.protection_dimensions",
        CanvasDimensions => "canvas.dimensions",
        CanvasEffectiveDimensions => "canvas.effective_dimensions",
    }
}

fdl_option! {
    /// How the fit source is scaled into the target dimensions.
    FitMethod as "fit_method" {
        Width => "width",
        Height => "height",
        FitAll => "fit_all",
        Fill => "fill",
    }
}

fdl_option! {
    AlignmentVertical as "alignment_method_vertical" {
        Center => "center",
        Top => "top",
        Bottom => "bottom",
    }
}

fdl_option! {
    AlignmentHorizontal as "alignment_method_horizontal" {
        Center => "center",
        Left => "left",
        Right => "right",
    }
}

fdl_option! {
    /// Outermost source rectangle carried over to the derived canvas.
    PreserveFromSourceCanvas as "preserve_from_source_canvas" {
        None => "none",
        FramingDecisionDimensions => "framing_decision.dimensions",
        FramingDecisionProtectionDimensions => "framing_decision.protection_dimensions",
        CanvasDimensions => "canvas.dimensions",
        CanvasEffectiveDimensions => "canvas.effective_dimensions",
    }
}

impl FitSource {
    /// Order in which attributes are transferred to a derived canvas,
    /// starting at this fit source and moving outwards.
    pub fn transfer_sequence(&self) -> [FitSource; 4] {
        use FitSource::*;
        match self {
            FramingDecisionDimensions => [
                FramingDecisionDimensions,
                FramingDecisionProtectionDimensions,
                CanvasEffectiveDimensions,
                CanvasDimensions,
            ],
            FramingDecisionProtectionDimensions => [
                FramingDecisionProtectionDimensions,
                FramingDecisionDimensions,
                CanvasEffectiveDimensions,
                CanvasDimensions,
            ],
            CanvasEffectiveDimensions => [
                CanvasEffectiveDimensions,
                FramingDecisionProtectionDimensions,
                FramingDecisionDimensions,
                CanvasDimensions,
            ],
            CanvasDimensions => [
                CanvasDimensions,
                CanvasEffectiveDimensions,
                FramingDecisionProtectionDimensions,
                FramingDecisionDimensions,
            ],
        }
    }
}

impl PreserveFromSourceCanvas {
    /// The preserved attribute, or `None` for `"none"`.
    pub fn as_fit_source(&self) -> Option<FitSource> {
        match self {
            PreserveFromSourceCanvas::None => None,
            PreserveFromSourceCanvas::FramingDecisionDimensions => {
                Some(FitSource::FramingDecisionDimensions)
            }
            PreserveFromSourceCanvas::FramingDecisionProtectionDimensions => {
                Some(FitSource::FramingDecisionProtectionDimensions)
            }
            PreserveFromSourceCanvas::CanvasDimensions => Some(FitSource::CanvasDimensions),
            PreserveFromSourceCanvas::CanvasEffectiveDimensions => {
                Some(FitSource::CanvasEffectiveDimensions)
            }
        }
    }
}

impl AlignmentHorizontal {
    /// Fraction of the free space placed before the aligned rectangle.
    pub fn factor(&self) -> f64 {
        match self {
            AlignmentHorizontal::Left => 0.0,
            AlignmentHorizontal::Center => 0.5,
            AlignmentHorizontal::Right => 1.0,
        }
    }
}

impl AlignmentVertical {
    /// Fraction of the free space placed above the aligned rectangle.
    pub fn factor(&self) -> f64 {
        match self {
            AlignmentVertical::Top => 0.0,
            AlignmentVertical::Center => 0.5,
            AlignmentVertical::Bottom => 1.0,
        }
    }
}
