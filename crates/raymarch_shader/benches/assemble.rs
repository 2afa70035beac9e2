mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use raymarch_shader::prelude::{
    ShaderAssembler, ShaderCache, ShaderRequest, TextureOverrides, TextureRegistry,
};

const LIGHTING: &str =
    "vec3 lighting( vec3 pos, vec3 nor, vec3 ro, vec3 rd, float materialId ) { return nor * .5 + .5; }";

fn request_with_textures(count: usize) -> ShaderRequest {
    let mut registry = TextureRegistry::default();
    let names: Vec<String> = registry.catalog().names().map(str::to_string).collect();
    for i in 0..count {
        registry.texture(&names[i % names.len()], &TextureOverrides::new());
    }
    ShaderRequest::new("vec2( length( p ) - 1., 0. )")
        .with_lighting(LIGHTING)
        .with_textures(&registry)
}

fn assemble_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader/assemble");

    for &n in &[0usize, 4, 16, 64] {
        let request = request_with_textures(n);
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &request, |b, request| {
            b.iter(|| black_box(ShaderAssembler::assemble(black_box(request))));
        });
    }

    group.finish();
}

fn cache_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader/cache");
    let request = request_with_textures(16);

    group.bench_function("hit", |b| {
        let mut cache = ShaderCache::new();
        let _ = cache.get_or_assemble("main", &request);
        b.iter(|| {
            let entry = cache.get_or_assemble("main", black_box(&request));
            black_box(entry.map(|e| e.rebuilt).unwrap_or(true));
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = assemble_benches, cache_benches
}
criterion_main!(benches);
