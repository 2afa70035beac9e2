mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use raymarch_shader::prelude::{TextureId, TextureOverrides, TextureRegistry};

fn registry_with(count: usize) -> TextureRegistry {
    let mut registry = TextureRegistry::default();
    let names: Vec<String> = registry.catalog().names().map(str::to_string).collect();
    for i in 0..count {
        registry.texture(&names[i % names.len()], &TextureOverrides::new());
    }
    registry
}

fn emit_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/emit");

    for &n in &[8usize, 64, 256] {
        let registry = registry_with(n);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("declarations", n), &registry, |b, r| {
            b.iter(|| black_box(r.emit_declarations()));
        });
        group.bench_with_input(BenchmarkId::new("dispatch", n), &registry, |b, r| {
            b.iter(|| black_box(r.emit_dispatch()));
        });
    }

    group.finish();
}

fn upload_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/upload");

    for &n in &[8usize, 64, 256] {
        let registry = registry_with(n);
        let decls = registry.emit_declarations();
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::new("all_dirty", n), &n, |b, _| {
            b.iter_batched(
                || {
                    let mut registry = registry.clone();
                    let program = common::CountingProgram::from_declarations(&decls);
                    registry.bind_locations(&program);
                    (registry, program)
                },
                |(mut registry, mut program)| black_box(registry.upload(&mut program)),
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("one_dirty", n), &n, |b, _| {
            let mut registry = registry.clone();
            let mut program = common::CountingProgram::from_declarations(&decls);
            registry.bind_locations(&program);
            registry.upload(&mut program);
            let mut t = 0.0f32;

            b.iter(|| {
                t += 0.016;
                if let Some(tex) = registry.get_mut(TextureId(0)) {
                    let _ = tex.set("size", t);
                }
                black_box(registry.upload(&mut program))
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = emit_benches, upload_benches
}
criterion_main!(benches);
