use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use znbt::{codec, CodecConfig, CompoundTag, ListTag, NbtWriter, Tag};

/// Составной тег, похожий на запись чанка: массивы, списки, вложенность.
fn chunk_like(
    rng: &mut SmallRng,
    sections: usize,
) -> Tag {
    let sections = (0..sections)
        .map(|y| {
            let blocks: Vec<i64> = (0..256).map(|_| rng.gen()).collect();
            Tag::from(
                CompoundTag::builder()
                    .put("Y", y as i8)
                    .put("BlockStates", Tag::LongArray(blocks))
                    .put("SkyLight", Tag::ByteArray((0..2048).map(|_| rng.gen()).collect()))
                    .build(),
            )
        })
        .collect();

    CompoundTag::builder()
        .put("DataVersion", 3465i32)
        .put("Status", "full")
        .put("Sections", ListTag::from_elements(sections).unwrap())
        .build()
        .into()
}

fn bench_encode(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut group = c.benchmark_group("encode");
    for sections in [1usize, 8, 24] {
        let tag = chunk_like(&mut rng, sections);
        let size = codec::to_bytes("", &tag).unwrap().len();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &tag, |b, tag| {
            b.iter(|| black_box(codec::to_bytes("", black_box(tag)).unwrap()))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut group = c.benchmark_group("decode");
    for sections in [1usize, 8, 24] {
        let bytes = codec::to_bytes("", &chunk_like(&mut rng, sections)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &bytes, |b, bytes| {
            b.iter(|| black_box(codec::from_bytes(black_box(bytes)).unwrap()))
        });
    }
    group.finish();
}

fn bench_compression_levels(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(13);
    let tag = chunk_like(&mut rng, 8);
    let mut group = c.benchmark_group("compression_level");
    for level in [0u32, 1, 6, 9] {
        let cfg = CodecConfig::default().with_compression_level(level);
        group.bench_with_input(BenchmarkId::from_parameter(level), &cfg, |b, cfg| {
            b.iter(|| {
                let mut writer = NbtWriter::with_config(Vec::with_capacity(64 * 1024), cfg);
                writer.write_tag("", black_box(&tag)).unwrap();
                black_box(writer.finish().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_compression_levels);
criterion_main!(benches);
