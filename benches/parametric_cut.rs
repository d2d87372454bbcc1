use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pseudoflow::solve_flat;

/// Same banded topology as `pseudoflow_engine`, but every source- and
/// sink-adjacent arc is genuinely affine in λ, exercising the recursive
/// contraction path rather than a single realized instance.
fn parametric_instance(node_count: usize) -> Vec<(usize, usize, f64, f64)> {
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
            let multiplier = if i == 0 {
                1.0
            } else if j == node_count - 1 {
                -0.5
            } else {
                0.0
            };
            arcs.push((i, j, constant, multiplier));
        }
    }
    arcs
}

fn bench_parametric(c: &mut Criterion) {
    let node_count = 150;
    let arcs = parametric_instance(node_count);
    c.bench_function("parametric_driver_recursive_contraction", |b| {
        b.iter(|| {
            let out = solve_flat(node_count, 0, node_count - 1, black_box(&arcs), [0.0, 5.0], true).unwrap();
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_parametric);
criterion_main!(benches);
