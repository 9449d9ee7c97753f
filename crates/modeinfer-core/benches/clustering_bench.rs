use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use modeinfer_core::{
    ClusterStrategy, GroundAtom, TypeInferencePipeline, build_position_sets, build_ranks,
    cluster_with,
};

/// Synthetic dataset with `heads` binary predicates over overlapping constant pools
fn synthetic_atoms(heads: usize, atoms_per_head: usize) -> Vec<GroundAtom> {
    let mut atoms = Vec::with_capacity(heads * atoms_per_head);
    for h in 0..heads {
        // every fourth predicate starts a fresh domain
        let domain = h / 4;
        for i in 0..atoms_per_head {
            atoms.push(GroundAtom::new(
                format!("pred{h}"),
                [format!("d{domain}_{}", i % 97), format!("d{domain}_{}", (i * 7 + h) % 89)],
            ));
        }
    }
    atoms
}

fn bench_clustering_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for heads in [16, 128, 512] {
        let atoms = synthetic_atoms(heads, 50);
        let ranks = build_ranks(&atoms);
        let sets = build_position_sets(&atoms, &ranks).unwrap();

        for strategy in [ClusterStrategy::UnionFind, ClusterStrategy::FloodFill] {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), heads),
                &sets,
                |b, sets| b.iter(|| black_box(cluster_with(sets, strategy, None))),
            );
        }
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let atoms = synthetic_atoms(256, 200);
    let pipeline = TypeInferencePipeline::new().without_hook();

    c.bench_function("infer_51200_atoms", |b| {
        b.iter(|| black_box(pipeline.run_atoms(&atoms).unwrap()));
    });
}

criterion_group!(benches, bench_clustering_strategies, bench_full_pipeline);
criterion_main!(benches);
