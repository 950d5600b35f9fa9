use std::{hint::black_box, time::Duration};

use criterion::{criterion_group, criterion_main, Criterion};
use znbt::{tag_enum, Registry, Tag};

#[derive(Debug, Clone, Copy)]
enum Weather {
    Clear,
    Rain,
    Thunder,
}

tag_enum!(Weather { Clear, Rain, Thunder });

fn bench_exact_dispatch(c: &mut Criterion) {
    let registry = Registry::default();
    let value = Duration::from_millis(1234);
    c.bench_function("to_tag exact (Duration)", |b| {
        b.iter(|| black_box(registry.to_tag(black_box(&value)).unwrap()))
    });

    let tag = Tag::Long(1234);
    c.bench_function("from_tag exact (Duration)", |b| {
        b.iter(|| black_box(registry.from_tag::<Duration>(black_box(&tag)).unwrap()))
    });
}

fn bench_hierarchy_dispatch(c: &mut Criterion) {
    let registry = Registry::default();
    c.bench_function("to_tag hierarchy (enum)", |b| {
        b.iter(|| black_box(registry.to_tag(black_box(&Weather::Thunder)).unwrap()))
    });

    let tag = Tag::String("Rain".into());
    c.bench_function("from_tag hierarchy (enum)", |b| {
        b.iter(|| black_box(registry.from_tag::<Weather>(black_box(&tag)).unwrap()))
    });
}

fn bench_build(c: &mut Criterion) {
    let builder = Registry::builder();
    c.bench_function("RegistryBuilder::build", |b| b.iter(|| black_box(builder.build())));
}

criterion_group!(benches, bench_exact_dispatch, bench_hierarchy_dispatch, bench_build);
criterion_main!(benches);
