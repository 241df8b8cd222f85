use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use s2match_core::domain::models::config::{MultiTokenConceptStrategy, SimilarityFunction, WeightingScheme};
use s2match_core::domain::models::triple::Graph;
use s2match_core::services::{build_pool, EmbeddingTable, SimilarityEngine};

fn chain_graph(n: usize) -> Graph {
    let instances: Vec<(usize, String)> = (0..n).map(|i| (i, format!("concept-{}", i % 5))).collect();
    let relations: Vec<(String, usize, usize)> = (0..n.saturating_sub(1))
        .map(|i| ("ARG0".to_string(), i, i + 1))
        .collect();
    Graph { instances, attributes: vec![("top".to_string(), 0, "concept-0".to_string())], relations }
}

fn bench_build_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_pool");
    let vectors = EmbeddingTable::empty();
    let engine = SimilarityEngine::new(&vectors, 0.5, 0.5, SimilarityFunction::Cosine, MultiTokenConceptStrategy::Split);

    for size in [20, 80, 200] {
        let g1 = chain_graph(size);
        let g2 = chain_graph(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(build_pool(&g1, &g2, &engine, WeightingScheme::Standard)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_pool);
criterion_main!(benches);
