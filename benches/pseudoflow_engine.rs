use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pseudoflow::solve_flat;

/// A banded synthetic graph in the style of petgraph's own minimum-cut
/// bench: each node connects to a small window of its neighbors, with
/// source = 0 and sink = NODE_COUNT - 1. Source-adjacent arcs carry a
/// positive λ-multiplier so the single-λ engine has real work to do.
fn banded_instance(node_count: usize) -> Vec<(usize, usize, f64, f64)> {
    let mut arcs = Vec::new();
    for i in 0..node_count {
        let neighbor_count = i % 8 + 3;
        let j_from = i.saturating_sub(neighbor_count / 2);
        let j_to = (j_from + neighbor_count).min(node_count);
        for j in j_from..j_to {
            if j == i {
                continue;
            }
            let constant = ((i + 3) % 10) as f64 + 1.0;
            let multiplier = if i == 0 { 1.0 } else { 0.0 };
            arcs.push((i, j, constant, multiplier));
        }
    }
    arcs
}

fn bench_engine(c: &mut Criterion) {
    let node_count = 200;
    let arcs = banded_instance(node_count);
    c.bench_function("pseudoflow_engine_single_lambda", |b| {
        b.iter(|| {
            let out = solve_flat(
                node_count,
                0,
                node_count - 1,
                black_box(&arcs),
                [1.0, 1.0],
                true,
            )
            .unwrap();
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
