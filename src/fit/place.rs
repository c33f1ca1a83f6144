use tracing::debug;

use crate::error::FdlError;
use crate::model::{
    AlignmentHorizontal, AlignmentVertical, Canvas, Dimensions, FramingDecision, FramingIntent,
    Record, RoundStrategy,
};

/// Places a framing intent inside a canvas.
///
/// The intent's aspect ratio is fitted into the canvas's active rectangle
/// (the effective region when set), shrunk by the intent's protection and
/// centered. The resulting framing decision is added to the canvas with the
/// id `"{canvas.id}-{intent.id}"`, which is returned.
///
/// # Errors
/// Fails if the canvas or intent lacks an id, the canvas has no dimensions,
/// the intent has no usable aspect ratio, or a decision with the same id
/// already exists in the canvas.
pub fn place_framing_intent(
    canvas: &mut Canvas,
    intent: &FramingIntent,
    rounding: &RoundStrategy,
) -> Result<String, FdlError> {
    let canvas_id = canvas.id.clone().ok_or(FdlError::MissingIdentifier {
        record: Canvas::schema().name,
        attribute: Canvas::schema().id_attribute,
    })?;
    let intent_id = intent.id.clone().ok_or(FdlError::MissingIdentifier {
        record: FramingIntent::schema().name,
        attribute: FramingIntent::schema().id_attribute,
    })?;

    let aspect_ratio = intent
        .aspect_ratio
        .filter(|ar| ar.width > 0.0 && ar.height > 0.0)
        .ok_or_else(|| {
            FdlError::Fit(format!("framing intent {intent_id:?} has no usable aspect_ratio"))
        })?;

    let (active, _) = canvas.active_geometry()?;
    let intent_aspect = aspect_ratio.aspect();
    let canvas_aspect = active.aspect();

    let (width, height) = if intent_aspect >= canvas_aspect {
        let width = active.width;
        (width, width * canvas.squeeze() / intent_aspect)
    } else {
        let height = active.height;
        (height * intent_aspect, height)
    };

    let mut decision = FramingDecision {
        label: intent.label.clone(),
        id: Some(format!("{canvas_id}-{intent_id}")),
        framing_intent_id: Some(intent_id),
        ..Default::default()
    };

    let protection = intent.protection.unwrap_or(0.0);
    let mut fitted = Dimensions::new(width, height);
    if protection > 0.0 {
        fitted = rounding.round_dimensions(&fitted);
        decision.protection_dimensions = Some(fitted);
        decision.adjust_protection_anchor_point(
            canvas,
            AlignmentHorizontal::Center,
            AlignmentVertical::Center,
        )?;
    }

    decision.dimensions = Some(rounding.round_dimensions(&Dimensions::new(
        fitted.width * (1.0 - protection),
        fitted.height * (1.0 - protection),
    )));
    decision.adjust_anchor_point(canvas, AlignmentHorizontal::Center, AlignmentVertical::Center)?;

    debug!(
        canvas = %canvas_id,
        decision = decision.id.as_deref().unwrap_or_default(),
        fit_to_width = intent_aspect >= canvas_aspect,
        protection,
        "placed framing intent"
    );

    let id = decision.id.clone().unwrap_or_default();
    canvas.framing_decisions.add(decision)?;
    Ok(id)
}
