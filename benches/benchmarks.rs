//! Benchmarks for pagination and markup handling

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use collab_pages::document::markup;
use collab_pages::layout::FontMetrics;
use collab_pages::{Document, EstimatedSurface, LayoutConstraints, PaginationEngine};

fn paragraphs(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "<p>Paragraph {} contains enough text to span multiple lines and test the line breaking algorithm.</p>",
                i
            )
        })
        .collect()
}

fn surface() -> EstimatedSurface {
    EstimatedSurface::new(LayoutConstraints::default(), FontMetrics::default())
}

fn bench_split_blocks(c: &mut Criterion) {
    let content = paragraphs(200);
    c.bench_function("split_blocks_200", |b| {
        b.iter(|| black_box(markup::split_blocks(black_box(&content))));
    });
}

fn bench_paginate_single_overflow(c: &mut Criterion) {
    let content = paragraphs(40);
    let engine = PaginationEngine::default();
    c.bench_function("paginate_one_overflowing_page", |b| {
        b.iter_batched(
            || (Document::from_pages("Bench", &[&content]), surface()),
            |(mut doc, mut surface)| black_box(engine.paginate(&mut doc, &mut surface)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_paginate_long_document(c: &mut Criterion) {
    // ~10 pages of content dumped onto one page
    let content = paragraphs(250);
    let engine = PaginationEngine::default();
    c.bench_function("paginate_long_document", |b| {
        b.iter_batched(
            || (Document::from_pages("Bench", &[&content]), surface()),
            |(mut doc, mut surface)| black_box(engine.paginate(&mut doc, &mut surface)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_fit_states_warm_cache(c: &mut Criterion) {
    let engine = PaginationEngine::default();
    let mut doc = Document::from_pages("Bench", &[&paragraphs(250)]);
    let mut surface = surface();
    engine.paginate(&mut doc, &mut surface);

    c.bench_function("fit_states_warm_cache", |b| {
        b.iter(|| black_box(engine.fit_states(&doc, &mut surface)));
    });
}

criterion_group!(
    benches,
    bench_split_blocks,
    bench_paginate_single_overflow,
    bench_paginate_long_document,
    bench_fit_states_warm_cache,
);
criterion_main!(benches);
