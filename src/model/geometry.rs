//! Geometric value types: [`Dimensions`] and [`Point`].

use serde::{Deserialize, Serialize};

use super::rounding::RoundStrategy;

/// Numeric representation a [`Dimensions`] value is emitted with.
///
/// Canvas-level dimensions are integral (pixels/photosites); framing
/// decisions and physical sizes are real-valued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Integral,
    #[default]
    Real,
}

/// Width and height of a rectangle.
///
/// Equality compares width and height only; the representation is a property
/// of the field a value is stored in, not of the value itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub kind: NumericKind,
}

impl Dimensions {
    /// The "zero-both" sentinel used to mark an absent source rectangle.
    pub const ZERO: Dimensions = Dimensions {
        width: 0.0,
        height: 0.0,
        kind: NumericKind::Real,
    };

    /// Creates real-valued dimensions.
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            kind: NumericKind::Real,
        }
    }

    /// Creates integral dimensions.
    #[inline]
    pub fn integral(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            kind: NumericKind::Integral,
        }
    }

    /// Returns a copy carrying the given representation.
    #[inline]
    pub fn with_kind(mut self, kind: NumericKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn is_integral(&self) -> bool {
        self.kind == NumericKind::Integral
    }

    /// True when both axes hold whole numbers.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.width.fract() == 0.0 && self.height.fract() == 0.0
    }

    /// True for the "zero-both" sentinel.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// True if width OR height is smaller than `other`'s.
    ///
    /// This is deliberately not [`PartialOrd`]: `a.any_smaller(b)` and
    /// `a.any_larger(b)` may both hold.
    pub fn any_smaller(&self, other: &Dimensions) -> bool {
        self.width < other.width || self.height < other.height
    }

    /// True if width OR height is larger than `other`'s.
    pub fn any_larger(&self, other: &Dimensions) -> bool {
        self.width > other.width || self.height > other.height
    }

    /// Componentwise minimum, keeping this value's representation.
    pub fn min(&self, other: &Dimensions) -> Dimensions {
        Dimensions {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
            kind: self.kind,
        }
    }

    /// Scales both axes by `factor`. Integral dimensions are rounded with
    /// `rounding` afterwards; real dimensions are left untouched.
    pub fn scale_by(&mut self, factor: f64, rounding: &RoundStrategy) {
        self.width *= factor;
        self.height *= factor;

        if self.is_integral() {
            *self = rounding.round_dimensions(self);
        }
    }
}

impl PartialEq for Dimensions {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

// Integral values are written as JSON integers, real values as floats.
// Fractional integral values are an error, never truncated.
impl Serialize for Dimensions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error, SerializeStruct};
        if self.is_integral() && !self.is_whole() {
            return Err(S::Error::custom(format!(
                "integral dimensions must be whole numbers, found {}x{}",
                self.width, self.height
            )));
        }

        let mut state = serializer.serialize_struct("Dimensions", 2)?;
        match self.kind {
            NumericKind::Integral => {
                state.serialize_field("width", &(self.width as i64))?;
                state.serialize_field("height", &(self.height as i64))?;
            }
            NumericKind::Real => {
                state.serialize_field("width", &self.width)?;
                state.serialize_field("height", &self.height)?;
            }
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Dimensions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct DimensionsData {
            width: f64,
            height: f64,
        }
        let data = DimensionsData::deserialize(deserializer)?;
        Ok(Dimensions::new(data.width, data.height))
    }
}

/// A 2D offset (x, y), real-valued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };
}
