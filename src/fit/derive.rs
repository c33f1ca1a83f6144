use tracing::debug;

use crate::error::FdlError;
use crate::model::{
    Canvas, CanvasTemplate, Dimensions, FitSource, FramingDecision, NumericKind, Point, Record,
    RoundStrategy,
};

/// Reads one of the four transferable rectangles from a canvas/decision pair.
fn source_rectangle(
    key: FitSource,
    canvas: &Canvas,
    decision: &FramingDecision,
) -> Option<Dimensions> {
    match key {
        FitSource::FramingDecisionDimensions => decision.dimensions,
        FitSource::FramingDecisionProtectionDimensions => decision.protection_dimensions,
        FitSource::CanvasDimensions => canvas.dimensions,
        FitSource::CanvasEffectiveDimensions => canvas.effective_dimensions,
    }
}

fn destination_kind(key: FitSource) -> NumericKind {
    match key {
        FitSource::FramingDecisionDimensions | FitSource::FramingDecisionProtectionDimensions => {
            NumericKind::Real
        }
        FitSource::CanvasDimensions | FitSource::CanvasEffectiveDimensions => {
            NumericKind::Integral
        }
    }
}

fn destination_slot<'a>(
    key: FitSource,
    canvas: &'a mut Canvas,
    decision: &'a mut FramingDecision,
) -> &'a mut Option<Dimensions> {
    match key {
        FitSource::FramingDecisionDimensions => &mut decision.dimensions,
        FitSource::FramingDecisionProtectionDimensions => &mut decision.protection_dimensions,
        FitSource::CanvasDimensions => &mut canvas.dimensions,
        FitSource::CanvasEffectiveDimensions => &mut canvas.effective_dimensions,
    }
}

/// Derives a new canvas from `source_canvas` through a canvas template.
///
/// The template's fit source is scaled into its target dimensions; the
/// attributes between the fit source and `preserve_from_source_canvas`
/// are carried over with the same scale factor. The returned canvas holds a
/// single framing decision derived from `source_decision`, aligned with the
/// template's alignment methods.
///
/// `rounding` applies to integral (canvas-level) dimensions while scaling;
/// the template's own `round` is applied to the final canvas dimensions.
///
/// # Errors
/// Fails if the source lacks an id, the fit source rectangle is missing or
/// empty, or the template lacks target dimensions or a fit method.
pub fn derive_canvas_from_template(
    template: &CanvasTemplate,
    source_canvas: &Canvas,
    source_decision: &FramingDecision,
    rounding: &RoundStrategy,
) -> Result<Canvas, FdlError> {
    let source_id = source_canvas.id.clone().ok_or(FdlError::MissingIdentifier {
        record: Canvas::schema().name,
        attribute: Canvas::schema().id_attribute,
    })?;
    let intent_id = source_decision
        .framing_intent_id
        .clone()
        .ok_or_else(|| FdlError::Fit("source framing decision has no framing_intent_id".into()))?;

    let canvas_id = uuid::Uuid::new_v4().simple().to_string();
    let source_squeeze = source_canvas.squeeze();
    let target_squeeze = template.target_squeeze();

    let mut canvas = Canvas {
        label: template.label.clone(),
        id: Some(canvas_id.clone()),
        source_canvas_id: Some(source_id),
        anamorphic_squeeze: Some(if target_squeeze == 0.0 {
            source_squeeze
        } else {
            target_squeeze
        }),
        ..Default::default()
    };
    let mut decision = FramingDecision {
        label: source_decision.label.clone(),
        id: Some(format!("{canvas_id}-{intent_id}")),
        framing_intent_id: Some(intent_id),
        ..Default::default()
    };

    let fit_source = template.effective_fit_source();
    let source_rect = source_rectangle(fit_source, source_canvas, source_decision)
        .filter(|rect| !rect.is_zero())
        .ok_or_else(|| FdlError::Fit(format!("fit source {fit_source} is not set")))?;
    let scale_factor = template.get_scale_factor(&source_rect, source_squeeze)?;

    for key in template.transfer_keys() {
        let Some(rect) = source_rectangle(key, source_canvas, source_decision) else {
            continue;
        };
        if rect.is_zero() {
            continue;
        }

        let kind = destination_kind(key);
        let mut scaled = if key == fit_source {
            template
                .fit_source_to_target(&rect, source_squeeze)?
                .with_kind(kind)
        } else {
            let mut scaled = Dimensions {
                width: template.get_desqueezed_width(rect.width, source_squeeze),
                height: rect.height,
                kind,
            };
            scaled.scale_by(scale_factor, rounding);
            scaled
        };
        if key == fit_source && scaled.is_integral() {
            scaled = rounding.round_dimensions(&scaled);
        }

        let slot = destination_slot(key, &mut canvas, &mut decision);
        if slot.is_none() {
            *slot = Some(scaled);
        }
    }

    if canvas.dimensions.is_none() {
        let preserved = template
            .preserve_from_source_canvas
            .and_then(|p| p.as_fit_source())
            .unwrap_or(fit_source);
        let fallback = *destination_slot(preserved, &mut canvas, &mut decision);
        canvas.dimensions = fallback
            .map(|d| rounding.round_dimensions(&d.with_kind(NumericKind::Integral)));
    }

    let mut dimensions = canvas
        .dimensions
        .ok_or_else(|| FdlError::Fit("derived canvas has no dimensions".into()))?
        .with_kind(NumericKind::Integral);

    if let Some(round) = template.round {
        dimensions = round.round_dimensions(&dimensions);
    }

    if let Some(maximum) = template.maximum_dimensions {
        dimensions = dimensions.min(&maximum);
        if template.pad_to_maximum == Some(true) {
            dimensions = maximum.with_kind(NumericKind::Integral);
        }
    }
    canvas.dimensions = Some(dimensions);

    if let Some(effective) = canvas.effective_dimensions {
        let effective = effective.min(&dimensions);
        canvas.effective_dimensions = Some(effective);
        canvas.effective_anchor_point = Some(Point::new(
            (dimensions.width - effective.width) / 2.0,
            (dimensions.height - effective.height) / 2.0,
        ));
    }

    let horizontal = template.horizontal_alignment();
    let vertical = template.vertical_alignment();
    decision.adjust_protection_anchor_point(&canvas, horizontal, vertical)?;
    decision.adjust_anchor_point(&canvas, horizontal, vertical)?;

    debug!(
        template = template.id.as_deref().unwrap_or_default(),
        source = source_canvas.id.as_deref().unwrap_or_default(),
        canvas = %canvas_id,
        %fit_source,
        scale_factor,
        width = dimensions.width,
        height = dimensions.height,
        "derived canvas from template"
    );

    canvas.framing_decisions.add(decision)?;
    Ok(canvas)
}

/// Like [`derive_canvas_from_template`], selecting the source framing
/// decision by its position in the source canvas.
pub fn derive_canvas_from_template_at(
    template: &CanvasTemplate,
    source_canvas: &Canvas,
    decision_index: usize,
    rounding: &RoundStrategy,
) -> Result<Canvas, FdlError> {
    let decision = source_canvas
        .framing_decisions
        .get_index(decision_index)
        .ok_or_else(|| {
            FdlError::Fit(format!(
                "canvas {:?} has no framing decision at index {decision_index}",
                source_canvas.id.as_deref().unwrap_or_default()
            ))
        })?;
    derive_canvas_from_template(template, source_canvas, decision, rounding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::place_framing_intent;
    use crate::model::{
        AlignmentHorizontal, AlignmentVertical, Direction, Evenness, FitMethod, FramingIntent,
        PreserveFromSourceCanvas, DEFAULT_ROUNDING_STRATEGY,
    };

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn source_canvas() -> Canvas {
        let mut canvas = Canvas::new("20220310", Dimensions::new(5184.0, 4320.0))
            .with_effective(Dimensions::new(5184.0, 4320.0), Point::ORIGIN)
            .with_squeeze(1.3);
        canvas.label = Some("Open Gate RAW".into());
        let intent = FramingIntent::new("FDLSMP03", Dimensions::new(16.0, 9.0))
            .with_label("1.78-1 Framing")
            .with_protection(0.088);
        place_framing_intent(&mut canvas, &intent, &DEFAULT_ROUNDING_STRATEGY).unwrap();
        canvas
    }

    fn vfx_pull() -> CanvasTemplate {
        CanvasTemplate {
            label: Some("VFX Pull".into()),
            id: Some("VX220310".into()),
            target_dimensions: Some(Dimensions::integral(4096.0, 2304.0)),
            target_anamorphic_squeeze: Some(1.0),
            fit_source: Some(FitSource::FramingDecisionDimensions),
            fit_method: Some(FitMethod::Width),
            alignment_method_vertical: Some(AlignmentVertical::Center),
            alignment_method_horizontal: Some(AlignmentHorizontal::Center),
            preserve_from_source_canvas: Some(PreserveFromSourceCanvas::CanvasDimensions),
            round: Some(RoundStrategy::new(Evenness::Even, Direction::Up)),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_vfx_pull() {
        let source = source_canvas();
        let canvas =
            derive_canvas_from_template_at(&vfx_pull(), &source, 0, &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();

        assert_eq!(canvas.label.as_deref(), Some("VFX Pull"));
        assert_eq!(canvas.source_canvas_id.as_deref(), Some("20220310"));
        assert_eq!(canvas.anamorphic_squeeze, Some(1.0));
        assert_eq!(canvas.dimensions, Some(Dimensions::new(4492.0, 2878.0)));
        assert_eq!(canvas.effective_dimensions, Some(Dimensions::new(4492.0, 2878.0)));
        assert_eq!(canvas.effective_anchor_point, Some(Point::ORIGIN));
        assert!(canvas.check_required().is_empty());

        let canvas_id = canvas.id.clone().unwrap();
        let fd = canvas.framing_decisions.get_index(0).unwrap();
        assert_eq!(fd.id, Some(format!("{canvas_id}-FDLSMP03")));
        assert_eq!(fd.framing_intent_id.as_deref(), Some("FDLSMP03"));
        assert_eq!(fd.label.as_deref(), Some("1.78-1 Framing"));

        let dims = fd.dimensions.unwrap();
        assert_close(dims.width, 4096.0);
        assert_close(dims.height, 2303.1003514252243);

        let protection = fd.protection_dimensions.unwrap();
        assert_close(protection.width, 4491.045685279187);
        assert_close(protection.height, 2525.6800728881944);

        let protection_anchor = fd.protection_anchor_point.unwrap();
        assert_close(protection_anchor.x, (4492.0 - protection.width) / 2.0);
        assert_close(protection_anchor.y, (2878.0 - protection.height) / 2.0);

        let anchor = fd.anchor_point.unwrap();
        assert_close(anchor.x, protection_anchor.x + (protection.width - dims.width) / 2.0);
        assert_close(anchor.y, protection_anchor.y + (protection.height - dims.height) / 2.0);
        assert_close(anchor.x, 198.0);
    }

    #[test]
    fn test_derive_without_preserve_uses_fit_source() {
        let source = source_canvas();
        let template = CanvasTemplate {
            preserve_from_source_canvas: Some(PreserveFromSourceCanvas::None),
            round: None,
            ..vfx_pull()
        };
        let canvas =
            derive_canvas_from_template_at(&template, &source, 0, &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();

        // 4096 x 2303.1 rounded to even numbers.
        assert_eq!(canvas.dimensions, Some(Dimensions::new(4096.0, 2304.0)));
        assert!(canvas.dimensions.is_some_and(|d| d.is_integral()));
        assert_eq!(canvas.effective_dimensions, None);

        let fd = canvas.framing_decisions.get_index(0).unwrap();
        assert_eq!(fd.protection_dimensions, None);
        let anchor = fd.anchor_point.unwrap();
        assert_close(anchor.x, 0.0);
        assert_close(anchor.y, (2304.0 - 2303.1003514252243) / 2.0);
    }

    #[test]
    fn test_derive_clamps_and_pads_to_maximum() {
        let source = source_canvas();
        let clamped = CanvasTemplate {
            maximum_dimensions: Some(Dimensions::integral(4096.0, 2160.0)),
            pad_to_maximum: Some(false),
            ..vfx_pull()
        };
        let canvas =
            derive_canvas_from_template_at(&clamped, &source, 0, &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();
        assert_eq!(canvas.dimensions, Some(Dimensions::new(4096.0, 2160.0)));
        assert_eq!(canvas.effective_dimensions, Some(Dimensions::new(4096.0, 2160.0)));
        assert_eq!(canvas.effective_anchor_point, Some(Point::ORIGIN));

        let padded = CanvasTemplate {
            maximum_dimensions: Some(Dimensions::integral(5000.0, 3000.0)),
            pad_to_maximum: Some(true),
            ..vfx_pull()
        };
        let canvas =
            derive_canvas_from_template_at(&padded, &source, 0, &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();
        assert_eq!(canvas.dimensions, Some(Dimensions::new(5000.0, 3000.0)));
        assert_eq!(canvas.effective_anchor_point, Some(Point::new(254.0, 61.0)));
    }

    #[test]
    fn test_derive_alignment_without_protection() {
        let mut source = Canvas::new("src", Dimensions::new(4000.0, 3000.0));
        let intent = FramingIntent::new("hd", Dimensions::new(16.0, 9.0));
        place_framing_intent(&mut source, &intent, &DEFAULT_ROUNDING_STRATEGY).unwrap();

        let template = CanvasTemplate {
            target_dimensions: Some(Dimensions::integral(2000.0, 2000.0)),
            preserve_from_source_canvas: Some(PreserveFromSourceCanvas::CanvasDimensions),
            alignment_method_horizontal: Some(AlignmentHorizontal::Left),
            alignment_method_vertical: Some(AlignmentVertical::Bottom),
            round: None,
            ..vfx_pull()
        };
        let canvas =
            derive_canvas_from_template_at(&template, &source, 0, &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();

        // 4000 wide -> 2000 wide: everything halves.
        assert_eq!(canvas.dimensions, Some(Dimensions::new(2000.0, 1500.0)));
        let fd = canvas.framing_decisions.get_index(0).unwrap();
        assert_eq!(fd.dimensions, Some(Dimensions::new(2000.0, 1125.0)));
        assert_eq!(fd.anchor_point, Some(Point::new(0.0, 375.0)));
    }

    #[test]
    fn test_derive_missing_fit_source_fails() {
        let source = source_canvas();
        let template = CanvasTemplate {
            fit_source: Some(FitSource::FramingDecisionProtectionDimensions),
            ..vfx_pull()
        };
        let mut decision = source.framing_decisions.get_index(0).unwrap().clone();
        decision.protection_dimensions = None;

        let err = derive_canvas_from_template(
            &template,
            &source,
            &decision,
            &DEFAULT_ROUNDING_STRATEGY,
        )
        .unwrap_err();
        assert!(err.to_string().contains("framing_decision.protection_dimensions"));
    }

    #[test]
    fn test_derive_bad_index_fails() {
        let source = source_canvas();
        let err = derive_canvas_from_template_at(&vfx_pull(), &source, 3, &DEFAULT_ROUNDING_STRATEGY)
            .unwrap_err();
        assert!(matches!(err, FdlError::Fit(_)));
    }
}
