//! Benchmarks for sheet rendering and export

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sheet_core::{AnswerSheetGenerator, LayoutVariant, Typeface};

fn benchmark_render(c: &mut Criterion) {
    let generator = AnswerSheetGenerator::with_typeface(LayoutVariant::Refined, Typeface::Builtin);

    c.bench_function("render_refined", |b| b.iter(|| black_box(generator.generate())));
}

fn benchmark_export(c: &mut Criterion) {
    let generator = AnswerSheetGenerator::with_typeface(LayoutVariant::Refined, Typeface::Builtin);
    let sheet = generator.generate();

    c.bench_function("export_png", |b| b.iter(|| sheet.png_bytes().unwrap()));
    c.bench_function("export_json", |b| b.iter(|| sheet.coordinates_json().unwrap()));
}

criterion_group!(benches, benchmark_render, benchmark_export);
criterion_main!(benches);
