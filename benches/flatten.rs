//! Benchmarks for model flattening.
//!
//! Run with: cargo bench

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use pont::storage::MemoryStorage;
use pont::{ParagraphKind, TextModel, flatten};

fn build_model(paragraphs: usize) -> TextModel {
    let mut model = TextModel::new("", "en", Box::new(MemoryStorage::new(8192)));
    for i in 0..paragraphs {
        model.begin_paragraph(ParagraphKind::Text).unwrap();
        model.add_text("Lorem ipsum dolor sit amet, consectetur adipiscing elit.");
        if i % 50 == 49 {
            model.begin_paragraph(ParagraphKind::EmptyLine).unwrap();
        }
    }
    model
}

fn bench_flatten_small(c: &mut Criterion) {
    c.bench_function("flatten_100_paragraphs", |b| {
        b.iter_batched(
            || build_model(100),
            |mut model| flatten(&mut model).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_flatten_large(c: &mut Criterion) {
    c.bench_function("flatten_20k_paragraphs", |b| {
        b.iter_batched(
            || build_model(20_000),
            |mut model| flatten(&mut model).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_flatten_small, bench_flatten_large);
criterion_main!(benches);
