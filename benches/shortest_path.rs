use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isochrone_graph::algorithms::{isochrone, shortest_path_with, ShortestPathOptions, ShortestPathStrategy};
use isochrone_graph::tools::{load_graph_from_str, to_text, ImportOptions};
use isochrone_graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random graph with vertices 0..n and about `degree` outgoing edges per vertex
fn random_graph(n: usize, degree: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    graph.resize(n as i64).unwrap();

    for source in 0..n {
        for _ in 0..degree {
            let destination = rng.gen_range(0..n);
            if destination != source && !graph.has_edge(source as i64, destination as i64) {
                graph
                    .add_edge(source as i64, destination as i64, rng.gen_range(1..100))
                    .unwrap();
            }
        }
    }
    graph
}

/// Benchmark both frontier strategies on growing graphs
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for &n in &[100usize, 500, 2000] {
        let graph = random_graph(n, 4, 42);
        group.throughput(Throughput::Elements(n as u64));

        for strategy in [ShortestPathStrategy::LinearScan, ShortestPathStrategy::BinaryHeap] {
            let options = ShortestPathOptions {
                strategy,
                record_steps: false,
            };
            group.bench_with_input(BenchmarkId::new(strategy.to_string(), n), &graph, |b, graph| {
                b.iter(|| shortest_path_with(black_box(graph), 0, &options).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark deriving isochrones from a computed result
fn bench_isochrone(c: &mut Criterion) {
    let graph = random_graph(2000, 4, 7);
    let result = shortest_path_with(&graph, 0, &ShortestPathOptions::default()).unwrap();

    c.bench_function("isochrone_2000_vertices", |b| {
        b.iter(|| isochrone(black_box(&result), 150).unwrap());
    });
}

/// Benchmark loading the text format
fn bench_load(c: &mut Criterion) {
    let text = to_text(&random_graph(2000, 4, 3));
    let options = ImportOptions::default();

    let mut group = c.benchmark_group("load_graph");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("2000_vertices", |b| {
        b.iter(|| load_graph_from_str(black_box(&text), &options).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_isochrone, bench_load);
criterion_main!(benches);
