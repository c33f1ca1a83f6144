use std::path::Path;

use fdl::fit::{derive_canvas_from_template, derive_canvas_from_template_at, place_framing_intent};
use fdl::model::{
    Canvas, CanvasTemplate, Dimensions, FitMethod, FitSource, FramingDecision, Point,
    PreserveFromSourceCanvas, DEFAULT_ROUNDING_STRATEGY,
};
use fdl::Fdl;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn fixture(name: &str) -> Fdl {
    fdl::io::read_from_file(&Path::new("tests/fixtures").join(name), true).unwrap()
}

fn wide_canvas() -> Canvas {
    let mut canvas = Canvas::new("wide", Dimensions::new(4000.0, 2000.0));
    canvas
        .framing_decisions
        .add(FramingDecision {
            id: Some("wide-2to1".into()),
            framing_intent_id: Some("2to1".into()),
            dimensions: Some(Dimensions::new(3000.0, 1500.0)),
            anchor_point: Some(Point::new(500.0, 250.0)),
            ..Default::default()
        })
        .unwrap();
    canvas
}

fn hd_template(method: FitMethod) -> CanvasTemplate {
    let mut template = CanvasTemplate::new("hd", Dimensions::new(1920.0, 1080.0), method);
    template.fit_source = Some(FitSource::FramingDecisionDimensions);
    template.preserve_from_source_canvas = Some(PreserveFromSourceCanvas::CanvasDimensions);
    template
}

#[test]
fn place_reproduces_sample_decision() {
    let sample = fixture("sample_valid.fdl");
    let mut doc = fixture("unplaced.fdl");

    let intent = doc.framing_intents.get("FDLSMP03").unwrap().clone();
    let canvas = doc
        .contexts
        .get_mut("PanavisionDXL2")
        .unwrap()
        .canvases
        .get_mut("20220310")
        .unwrap();
    let id = place_framing_intent(canvas, &intent, &DEFAULT_ROUNDING_STRATEGY).unwrap();

    let expected = sample
        .contexts
        .get("PanavisionDXL2")
        .unwrap()
        .canvases
        .get("20220310")
        .unwrap()
        .framing_decisions
        .get(&id)
        .unwrap();
    assert_eq!(canvas.framing_decisions.get(&id).unwrap(), expected);
}

#[test]
fn derived_canvas_joins_document_and_validates() {
    let mut doc = fixture("sample_valid.fdl");
    let template = doc.canvas_templates.get("VX220310").unwrap().clone();
    let source = doc
        .contexts
        .get("PanavisionDXL2")
        .unwrap()
        .canvases
        .get("20220310")
        .unwrap()
        .clone();

    let derived =
        derive_canvas_from_template_at(&template, &source, 0, &DEFAULT_ROUNDING_STRATEGY).unwrap();
    assert_eq!(derived.dimensions, Some(Dimensions::new(4492.0, 2878.0)));
    assert_eq!(derived.id.as_deref().map(str::len), Some(32));

    doc.contexts
        .get_mut("PanavisionDXL2")
        .unwrap()
        .canvases
        .add(derived)
        .unwrap();
    doc.validate().unwrap();
}

#[test]
fn fill_crops_to_target() {
    let source = wide_canvas();
    let decision = source.framing_decisions.get("wide-2to1").unwrap();

    let canvas = derive_canvas_from_template(
        &hd_template(FitMethod::Fill),
        &source,
        decision,
        &DEFAULT_ROUNDING_STRATEGY,
    )
    .unwrap();

    assert_eq!(canvas.dimensions, Some(Dimensions::new(2880.0, 1440.0)));
    let fd = canvas.framing_decisions.get_index(0).unwrap();
    let dims = fd.dimensions.unwrap();
    assert_close(dims.width, 1920.0);
    assert_close(dims.height, 1080.0);
    let anchor = fd.anchor_point.unwrap();
    assert_close(anchor.x, 480.0);
    assert_close(anchor.y, 180.0);
}

#[test]
fn fit_all_keeps_whole_source_visible() {
    let source = wide_canvas();
    let decision = source.framing_decisions.get("wide-2to1").unwrap();

    let canvas = derive_canvas_from_template(
        &hd_template(FitMethod::FitAll),
        &source,
        decision,
        &DEFAULT_ROUNDING_STRATEGY,
    )
    .unwrap();

    assert_eq!(canvas.dimensions, Some(Dimensions::new(2560.0, 1280.0)));
    let fd = canvas.framing_decisions.get_index(0).unwrap();
    let dims = fd.dimensions.unwrap();
    assert_close(dims.width, 1920.0);
    assert_close(dims.height, 960.0);
    let anchor = fd.anchor_point.unwrap();
    assert_close(anchor.x, 320.0);
    assert_close(anchor.y, 160.0);
}

#[test]
fn zero_target_squeeze_keeps_source_squeeze() {
    let source = wide_canvas().with_squeeze(2.0);
    let mut template = hd_template(FitMethod::Width);
    template.target_anamorphic_squeeze = Some(0.0);

    let canvas = derive_canvas_from_template_at(&template, &source, 0, &DEFAULT_ROUNDING_STRATEGY)
        .unwrap();

    assert_eq!(canvas.anamorphic_squeeze, Some(2.0));
    let dims = canvas.framing_decisions.get_index(0).unwrap().dimensions.unwrap();
    assert_close(dims.width, 1920.0);
    assert_close(dims.height, 960.0);
}

#[test]
fn derivation_does_not_touch_source() {
    let source = wide_canvas();
    let before = source.clone();
    derive_canvas_from_template_at(
        &hd_template(FitMethod::Height),
        &source,
        0,
        &DEFAULT_ROUNDING_STRATEGY,
    )
    .unwrap();
    assert_eq!(source, before);
}
