use criterion::{BatchSize, BenchmarkId, Criterion, SamplingMode, Throughput, criterion_group};
use rand::Rng;
use weighted_push_relabel::solver::solve_without_observer;
use weighted_push_relabel::weight::UnitWeight;

/// A layered DAG with `layers` layers of `width` vertices each, fully
/// connected layer-to-layer, source `0` feeding layer 0 and the sink
/// absorbing layer `layers - 1`.
fn layered_dag(layers: usize, width: usize) -> (usize, Vec<(usize, usize, i64)>, usize, usize) {
    let mut rng = rand::rng();
    let n = 2 + layers * width;
    let source = 0;
    let sink = n - 1;
    let mut edges = Vec::new();

    let first_layer_start = 1;
    for w in 0..width {
        edges.push((source, first_layer_start + w, rng.random_range(1..50)));
    }
    for layer in 0..layers - 1 {
        let this_start = 1 + layer * width;
        let next_start = 1 + (layer + 1) * width;
        for u in 0..width {
            for v in 0..width {
                edges.push((this_start + u, next_start + v, rng.random_range(1..50)));
            }
        }
    }
    let last_start = 1 + (layers - 1) * width;
    for w in 0..width {
        edges.push((last_start + w, sink, rng.random_range(1..50)));
    }

    (n, edges, source, sink)
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted push-relabel solve, layered DAG");
    group.sampling_mode(SamplingMode::Flat);
    for width in [4, 8, 16] {
        let (n, edges, source, sink) = layered_dag(6, width);
        group.throughput(Throughput::Elements(edges.len() as u64));
        group.bench_function(BenchmarkId::new("solve", width), |b| {
            b.iter_batched(
                || {
                    // an upper bound on the achievable flow, so supply/demand
                    // never forces the source to exhaust every relabel before
                    // the solve naturally converges.
                    let bound: i64 = edges
                        .iter()
                        .filter(|&&(u, _, _)| u == source)
                        .map(|&(_, _, c)| c)
                        .sum();
                    let mut supply = vec![0i64; n];
                    let mut demand = vec![0i64; n];
                    supply[source] = bound;
                    demand[sink] = bound;
                    (edges.clone(), supply, demand)
                },
                |(edges, supply, demand)| {
                    let weight = UnitWeight;
                    solve_without_observer(n, &edges, &supply, &demand, &weight, n as i64).unwrap()
                },
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(solve_scaling, bench_solve);
