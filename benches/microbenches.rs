//! Criterion microbenches for FDL parsing and framing geometry.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - FDL JSON parsing (read_from_string)
//! - Framing intent placement (place_framing_intent)
//! - Canvas derivation (derive_canvas_from_template)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use fdl::fit::{derive_canvas_from_template_at, place_framing_intent};
use fdl::io::read_from_string;
use fdl::model::{Canvas, Dimensions, FramingIntent, DEFAULT_ROUNDING_STRATEGY};

// Include test fixtures at compile time (no file I/O during benchmark)
const SAMPLE_FIXTURE: &str = include_str!("../tests/fixtures/sample_valid.fdl");

/// Benchmark FDL JSON parsing, with and without validation.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("fdl_parse");
    group.throughput(Throughput::Bytes(SAMPLE_FIXTURE.len() as u64));

    group.bench_function("read_from_string", |b| {
        b.iter(|| {
            let doc = read_from_string(black_box(SAMPLE_FIXTURE), false).unwrap();
            black_box(doc)
        })
    });

    group.bench_function("read_from_string_validated", |b| {
        b.iter(|| {
            let doc = read_from_string(black_box(SAMPLE_FIXTURE), true).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark placing a framing intent into a fresh canvas.
fn bench_place(c: &mut Criterion) {
    let canvas = Canvas::new("20220310", Dimensions::new(5184.0, 4320.0)).with_squeeze(1.3);
    let intent = FramingIntent::new("FDLSMP03", Dimensions::new(16.0, 9.0)).with_protection(0.088);

    c.bench_function("place_framing_intent", |b| {
        b.iter(|| {
            let mut canvas = canvas.clone();
            place_framing_intent(&mut canvas, black_box(&intent), &DEFAULT_ROUNDING_STRATEGY)
                .unwrap();
            black_box(canvas)
        })
    });
}

/// Benchmark deriving a VFX pull from the sample document.
///
/// We parse the fixture once to get the source canvas and template, then
/// benchmark only the derivation.
fn bench_derive(c: &mut Criterion) {
    let doc = read_from_string(SAMPLE_FIXTURE, false).unwrap();
    let template = doc.canvas_templates.get("VX220310").unwrap();
    let source = doc
        .contexts
        .get("PanavisionDXL2")
        .unwrap()
        .canvases
        .get("20220310")
        .unwrap();

    c.bench_function("derive_canvas_from_template", |b| {
        b.iter(|| {
            let canvas = derive_canvas_from_template_at(
                black_box(template),
                black_box(source),
                0,
                &DEFAULT_ROUNDING_STRATEGY,
            )
            .unwrap();
            black_box(canvas)
        })
    });
}

criterion_group!(benches, bench_parse, bench_place, bench_derive);
criterion_main!(benches);
