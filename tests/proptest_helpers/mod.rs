#![allow(dead_code)]

use fdl::model::{
    AlignmentHorizontal, AlignmentVertical, Canvas, CanvasTemplate, Context, Dimensions,
    Direction, Evenness, FitMethod, FitSource, FramingDecision, FramingIntent, Point,
    PreserveFromSourceCanvas, RoundStrategy,
};
use fdl::Fdl;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Non-empty labels; empty strings are omitted on write.
pub fn arb_label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .:-]{1,16}"
}

/// Whole-number dimensions, as stored in integral fields.
pub fn arb_integral_dimensions() -> impl Strategy<Value = Dimensions> {
    (1u32..=8192, 1u32..=8192).prop_map(|(w, h)| Dimensions::integral(w as f64, h as f64))
}

/// Real dimensions with two decimals.
pub fn arb_real_dimensions() -> impl Strategy<Value = Dimensions> {
    (1u32..=819_200, 1u32..=819_200)
        .prop_map(|(w, h)| Dimensions::new(w as f64 / 100.0, h as f64 / 100.0))
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (0u32..=400_000, 0u32..=400_000).prop_map(|(x, y)| Point::new(x as f64 / 100.0, y as f64 / 100.0))
}

pub fn arb_squeeze() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(1.3), Just(1.5), Just(1.8), Just(2.0)]
}

pub fn arb_rounding() -> impl Strategy<Value = RoundStrategy> {
    (
        prop_oneof![Just(Evenness::Even), Just(Evenness::Whole)],
        prop_oneof![Just(Direction::Up), Just(Direction::Down), Just(Direction::Round)],
    )
        .prop_map(|(even, mode)| RoundStrategy::new(even, mode))
}

pub fn arb_framing_intent(id: String) -> impl Strategy<Value = FramingIntent> {
    (
        proptest::option::of(arb_label()),
        arb_integral_dimensions(),
        proptest::option::of(1u32..50),
    )
        .prop_map(move |(label, aspect_ratio, protection)| FramingIntent {
            id: Some(id.clone()),
            label,
            aspect_ratio: Some(aspect_ratio),
            protection: protection.map(|p| p as f64 / 100.0),
        })
}

pub fn arb_framing_decision(id: String, intent_id: String) -> impl Strategy<Value = FramingDecision> {
    (
        proptest::option::of(arb_label()),
        arb_real_dimensions(),
        arb_point(),
        proptest::option::of((arb_real_dimensions(), arb_point())),
    )
        .prop_map(move |(label, dimensions, anchor, protection)| FramingDecision {
            label,
            id: Some(id.clone()),
            framing_intent_id: Some(intent_id.clone()),
            dimensions: Some(dimensions),
            anchor_point: Some(anchor),
            protection_dimensions: protection.map(|(d, _)| d),
            protection_anchor_point: protection.map(|(_, p)| p),
        })
}

pub fn arb_canvas(id: String, intent_ids: Vec<String>) -> impl Strategy<Value = Canvas> {
    let decisions = if intent_ids.is_empty() {
        Just(Vec::new()).boxed()
    } else {
        let canvas_id = id.clone();
        proptest::sample::subsequence(intent_ids.clone(), 0..=intent_ids.len())
            .prop_flat_map(move |ids| {
                ids.into_iter()
                    .map(|intent| arb_framing_decision(format!("{canvas_id}-{intent}"), intent))
                    .collect::<Vec<_>>()
            })
            .boxed()
    };

    (
        proptest::option::of(arb_label()),
        arb_integral_dimensions(),
        proptest::option::of((arb_integral_dimensions(), arb_point())),
        proptest::option::of(arb_integral_dimensions()),
        proptest::option::of(arb_real_dimensions()),
        arb_squeeze(),
        decisions,
    )
        .prop_map(
            move |(label, dimensions, effective, photosite, physical, squeeze, decisions)| {
                let mut canvas = Canvas::new(id.clone(), dimensions).with_squeeze(squeeze);
                canvas.label = label;
                if let Some((dims, anchor)) = effective {
                    canvas = canvas.with_effective(dims, anchor);
                }
                canvas.photosite_dimensions = photosite;
                canvas.physical_dimensions = physical;
                for decision in decisions {
                    canvas.framing_decisions.add(decision).unwrap();
                }
                canvas
            },
        )
}

pub fn arb_canvas_template(id: String) -> impl Strategy<Value = CanvasTemplate> {
    (
        proptest::option::of(arb_label()),
        arb_integral_dimensions(),
        arb_squeeze(),
        prop_oneof![
            Just(FitSource::FramingDecisionDimensions),
            Just(FitSource::FramingDecisionProtectionDimensions),
            Just(FitSource::CanvasDimensions),
            Just(FitSource::CanvasEffectiveDimensions),
        ],
        prop_oneof![
            Just(FitMethod::Width),
            Just(FitMethod::Height),
            Just(FitMethod::FitAll),
            Just(FitMethod::Fill),
        ],
        prop_oneof![
            Just(AlignmentVertical::Top),
            Just(AlignmentVertical::Center),
            Just(AlignmentVertical::Bottom),
        ],
        prop_oneof![
            Just(AlignmentHorizontal::Left),
            Just(AlignmentHorizontal::Center),
            Just(AlignmentHorizontal::Right),
        ],
        prop_oneof![
            Just(PreserveFromSourceCanvas::None),
            Just(PreserveFromSourceCanvas::CanvasDimensions),
            Just(PreserveFromSourceCanvas::CanvasEffectiveDimensions),
        ],
        proptest::option::of((arb_integral_dimensions(), any::<bool>())),
        proptest::option::of(arb_rounding()),
    )
        .prop_map(
            move |(label, target, squeeze, source, method, vertical, horizontal, preserve, maximum, round)| {
                CanvasTemplate {
                    label,
                    id: Some(id.clone()),
                    target_dimensions: Some(target),
                    target_anamorphic_squeeze: Some(squeeze),
                    fit_source: Some(source),
                    fit_method: Some(method),
                    alignment_method_vertical: Some(vertical),
                    alignment_method_horizontal: Some(horizontal),
                    preserve_from_source_canvas: Some(preserve),
                    maximum_dimensions: maximum.map(|(d, _)| d),
                    pad_to_maximum: maximum.map(|(_, pad)| pad),
                    round,
                }
            },
        )
}

/// A complete document with unique ids and resolvable references.
pub fn arb_fdl(max_intents: usize, max_canvases: usize, max_templates: usize) -> BoxedStrategy<Fdl> {
    (0..=max_intents, 0..=max_canvases, 0..=max_templates)
        .prop_flat_map(|(n_intents, n_canvases, n_templates)| {
            let intent_ids: Vec<String> = (0..n_intents).map(|i| format!("FI{i:02}")).collect();

            let intents: Vec<_> = intent_ids
                .iter()
                .map(|id| arb_framing_intent(id.clone()))
                .collect();
            let canvases: Vec<_> = (0..n_canvases)
                .map(|i| arb_canvas(format!("C{i:02}"), intent_ids.clone()))
                .collect();
            let templates: Vec<_> = (0..n_templates)
                .map(|i| arb_canvas_template(format!("T{i:02}")))
                .collect();

            (
                intents,
                canvases,
                templates,
                proptest::option::of(arb_label()),
                any::<bool>(),
            )
        })
        .prop_map(|(intents, canvases, templates, context_creator, use_default)| {
            let mut fdl = Fdl::with_defaults();
            if use_default {
                fdl.default_framing_intent = intents.first().and_then(|i| i.id.clone());
            }
            for intent in intents {
                fdl.framing_intents.add(intent).unwrap();
            }

            let mut ctx = Context::new("main");
            ctx.context_creator = context_creator;
            for canvas in canvases {
                ctx.canvases.add(canvas).unwrap();
            }
            fdl.contexts.add(ctx).unwrap();

            for template in templates {
                fdl.canvas_templates.add(template).unwrap();
            }
            fdl
        })
        .boxed()
}
