use serde_json::Value;

use super::geometry::{Dimensions, NumericKind};
use super::options::{
    AlignmentHorizontal, AlignmentVertical, FitMethod, FitSource, PreserveFromSourceCanvas,
};
use super::record::{
    decode, decode_integral, decode_option, encode, encode_record, unknown_field, DefaultValue,
    Field, Record, RecordSchema,
};
use super::rounding::RoundStrategy;
use crate::error::FdlError;

/// A reusable recipe for deriving one canvas from another: target size and
/// squeeze, which source rectangle to fit and how, alignment, size caps and
/// rounding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasTemplate {
    pub label: Option<String>,
    pub id: Option<String>,
    pub target_dimensions: Option<Dimensions>,
    /// `0` keeps the source squeeze.
    pub target_anamorphic_squeeze: Option<f64>,
    pub fit_source: Option<FitSource>,
    pub fit_method: Option<FitMethod>,
    pub alignment_method_vertical: Option<AlignmentVertical>,
    pub alignment_method_horizontal: Option<AlignmentHorizontal>,
    pub preserve_from_source_canvas: Option<PreserveFromSourceCanvas>,
    pub maximum_dimensions: Option<Dimensions>,
    pub pad_to_maximum: Option<bool>,
    pub round: Option<RoundStrategy>,
}

fn unit_squeeze() -> Value {
    Value::from(1.0)
}

fn default_fit_source() -> Value {
    Value::from(FitSource::FramingDecisionDimensions.as_str())
}

fn default_vertical() -> Value {
    Value::from(AlignmentVertical::Center.as_str())
}

fn default_horizontal() -> Value {
    Value::from(AlignmentHorizontal::Center.as_str())
}

fn default_preserve() -> Value {
    Value::from(PreserveFromSourceCanvas::None.as_str())
}

static SCHEMA: RecordSchema = RecordSchema {
    name: "CanvasTemplate",
    fields: &[
        Field::value("label"),
        Field::value("id"),
        Field::value("target_dimensions"),
        Field::value("target_anamorphic_squeeze"),
        Field::value("fit_source"),
        Field::value("fit_method"),
        Field::value("alignment_method_vertical"),
        Field::value("alignment_method_horizontal"),
        Field::value("preserve_from_source_canvas"),
        Field::value("maximum_dimensions"),
        Field::value("pad_to_maximum"),
        Field::record("round"),
    ],
    aliases: &[],
    required: &[
        "id",
        "target_dimensions",
        "target_anamorphic_squeeze",
        "fit_source",
        "fit_method",
        "maximum_dimensions.pad_to_maximum",
        "pad_to_maximum.maximum_dimensions",
    ],
    defaults: &[
        ("target_anamorphic_squeeze", DefaultValue::Literal(unit_squeeze)),
        ("fit_source", DefaultValue::Literal(default_fit_source)),
        ("alignment_method_vertical", DefaultValue::Literal(default_vertical)),
        ("alignment_method_horizontal", DefaultValue::Literal(default_horizontal)),
        ("preserve_from_source_canvas", DefaultValue::Literal(default_preserve)),
    ],
    id_attribute: "id",
};

impl CanvasTemplate {
    pub fn new(id: impl Into<String>, target_dimensions: Dimensions, fit_method: FitMethod) -> Self {
        Self {
            id: Some(id.into()),
            target_dimensions: Some(target_dimensions.with_kind(NumericKind::Integral)),
            fit_method: Some(fit_method),
            ..Default::default()
        }
    }

    fn target(&self) -> Result<Dimensions, FdlError> {
        self.target_dimensions.ok_or_else(|| {
            FdlError::Fit(format!(
                "canvas template {:?} has no target_dimensions",
                self.id.as_deref().unwrap_or_default()
            ))
        })
    }

    fn method(&self) -> Result<FitMethod, FdlError> {
        self.fit_method.ok_or_else(|| {
            FdlError::Fit(format!(
                "canvas template {:?} has no fit_method",
                self.id.as_deref().unwrap_or_default()
            ))
        })
    }

    /// Target squeeze, `1.0` when unset.
    pub fn target_squeeze(&self) -> f64 {
        self.target_anamorphic_squeeze.unwrap_or(1.0)
    }

    /// Fit source, falling back to `framing_decision.dimensions`.
    pub fn effective_fit_source(&self) -> FitSource {
        self.fit_source
            .unwrap_or(FitSource::FramingDecisionDimensions)
    }

    pub fn horizontal_alignment(&self) -> AlignmentHorizontal {
        self.alignment_method_horizontal
            .unwrap_or(AlignmentHorizontal::Center)
    }

    pub fn vertical_alignment(&self) -> AlignmentVertical {
        self.alignment_method_vertical
            .unwrap_or(AlignmentVertical::Center)
    }

    /// Converts a source width to the target squeeze.
    ///
    /// A target squeeze of `0` means "same as source": the width is
    /// returned unchanged.
    pub fn get_desqueezed_width(&self, source_width: f64, source_squeeze: f64) -> f64 {
        let target_squeeze = self.target_squeeze();
        if target_squeeze == 0.0 {
            return source_width;
        }
        source_width * source_squeeze / target_squeeze
    }

    /// Factor that scales `source` into the target dimensions according to
    /// the fit method.
    ///
    /// Fitting to width is the base case. `height` always fits to height,
    /// `fit_all` does so when the target is relatively wider than the source
    /// and `fill` when it is relatively narrower.
    pub fn get_scale_factor(&self, source: &Dimensions, source_squeeze: f64) -> Result<f64, FdlError> {
        let target = self.target()?;
        let method = self.method()?;

        if source.width <= 0.0 || source.height <= 0.0 {
            return Err(FdlError::Fit(format!(
                "cannot scale a {}x{} source rectangle",
                source.width, source.height
            )));
        }

        let desqueezed_width = self.get_desqueezed_width(source.width, source_squeeze);
        let target_aspect = target.aspect();
        let source_aspect = desqueezed_width / source.height;

        let width_factor = target.width / desqueezed_width;
        let height_factor = target.height / source.height;

        let factor = match method {
            FitMethod::Height => height_factor,
            FitMethod::FitAll if target_aspect > source_aspect => height_factor,
            FitMethod::Fill if target_aspect < source_aspect => height_factor,
            _ => width_factor,
        };
        Ok(factor)
    }

    /// Size of `source` once scaled into the target.
    ///
    /// `width` and `height` crop the other axis to the target, `fill` crops
    /// both, and `fit_all` shrinks uniformly until neither axis overflows.
    pub fn fit_source_to_target(
        &self,
        source: &Dimensions,
        source_squeeze: f64,
    ) -> Result<Dimensions, FdlError> {
        let target = self.target()?;
        let factor = self.get_scale_factor(source, source_squeeze)?;

        let scaled = Dimensions::new(
            self.get_desqueezed_width(source.width, source_squeeze) * factor,
            source.height * factor,
        );
        Ok(clamp_to_target(self.method()?, scaled, &target))
    }

    /// Source attributes transferred to a derived canvas, from the fit
    /// source up to and including the preserved attribute.
    pub fn transfer_keys(&self) -> Vec<FitSource> {
        let fit_source = self.effective_fit_source();
        let Some(preserve) = self
            .preserve_from_source_canvas
            .and_then(|p| p.as_fit_source())
        else {
            return vec![fit_source];
        };

        let sequence = fit_source.transfer_sequence();
        let end = sequence
            .iter()
            .position(|key| *key == preserve)
            .unwrap_or(0);
        sequence[..=end].to_vec()
    }
}

/// Crops or shrinks an already scaled rectangle into `target`.
///
/// With a factor from [`CanvasTemplate::get_scale_factor`] a `fit_all`
/// rectangle already fits; the uniform shrink only engages for other
/// factors.
fn clamp_to_target(method: FitMethod, scaled: Dimensions, target: &Dimensions) -> Dimensions {
    let Dimensions {
        mut width,
        mut height,
        ..
    } = scaled;

    match method {
        FitMethod::Width => height = height.min(target.height),
        FitMethod::Height => width = width.min(target.width),
        FitMethod::FitAll => {
            if width > target.width {
                let adjust = target.width / width;
                width *= adjust;
                height *= adjust;
            }
            if height > target.height {
                let adjust = target.height / height;
                width *= adjust;
                height *= adjust;
            }
        }
        FitMethod::Fill => {
            width = width.min(target.width);
            height = height.min(target.height);
        }
    }

    Dimensions::new(width, height)
}

impl Record for CanvasTemplate {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn is_set(&self, attribute: &str) -> bool {
        match attribute {
            "label" => self.label.is_some(),
            "id" => self.id.is_some(),
            "target_dimensions" => self.target_dimensions.is_some(),
            "target_anamorphic_squeeze" => self.target_anamorphic_squeeze.is_some(),
            "fit_source" => self.fit_source.is_some(),
            "fit_method" => self.fit_method.is_some(),
            "alignment_method_vertical" => self.alignment_method_vertical.is_some(),
            "alignment_method_horizontal" => self.alignment_method_horizontal.is_some(),
            "preserve_from_source_canvas" => self.preserve_from_source_canvas.is_some(),
            "maximum_dimensions" => self.maximum_dimensions.is_some(),
            "pad_to_maximum" => self.pad_to_maximum.is_some(),
            "round" => self.round.is_some(),
            _ => false,
        }
    }

    fn get_field(&self, attribute: &str) -> Result<Option<Value>, FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => encode(name, attribute, &self.label),
            "id" => encode(name, attribute, &self.id),
            "target_dimensions" => encode(
                name,
                attribute,
                &self.target_dimensions.map(|d| d.with_kind(NumericKind::Integral)),
            ),
            "target_anamorphic_squeeze" => encode(name, attribute, &self.target_anamorphic_squeeze),
            "fit_source" => encode(name, attribute, &self.fit_source),
            "fit_method" => encode(name, attribute, &self.fit_method),
            "alignment_method_vertical" => encode(name, attribute, &self.alignment_method_vertical),
            "alignment_method_horizontal" => {
                encode(name, attribute, &self.alignment_method_horizontal)
            }
            "preserve_from_source_canvas" => {
                encode(name, attribute, &self.preserve_from_source_canvas)
            }
            "maximum_dimensions" => encode(
                name,
                attribute,
                &self.maximum_dimensions.map(|d| d.with_kind(NumericKind::Integral)),
            ),
            "pad_to_maximum" => encode(name, attribute, &self.pad_to_maximum),
            "round" => encode_record(&self.round),
            other => Err(unknown_field(name, other)),
        }
    }

    fn set_field(&mut self, attribute: &str, value: Value) -> Result<(), FdlError> {
        let name = SCHEMA.name;
        match attribute {
            "label" => self.label = Some(decode(name, attribute, value)?),
            "id" => self.id = Some(decode(name, attribute, value)?),
            "target_dimensions" => {
                self.target_dimensions = Some(decode_integral(name, attribute, value)?)
            }
            "target_anamorphic_squeeze" => {
                self.target_anamorphic_squeeze = Some(decode(name, attribute, value)?)
            }
            "fit_source" => self.fit_source = Some(decode_option(name, attribute, value)?),
            "fit_method" => self.fit_method = Some(decode_option(name, attribute, value)?),
            "alignment_method_vertical" => {
                self.alignment_method_vertical = Some(decode_option(name, attribute, value)?)
            }
            "alignment_method_horizontal" => {
                self.alignment_method_horizontal = Some(decode_option(name, attribute, value)?)
            }
            "preserve_from_source_canvas" => {
                self.preserve_from_source_canvas = Some(decode_option(name, attribute, value)?)
            }
            "maximum_dimensions" => {
                self.maximum_dimensions = Some(decode_integral(name, attribute, value)?)
            }
            "pad_to_maximum" => self.pad_to_maximum = Some(decode(name, attribute, value)?),
            "round" => self.round = Some(RoundStrategy::from_value(&value)?),
            other => return Err(unknown_field(name, other)),
        }
        Ok(())
    }

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
