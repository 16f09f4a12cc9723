use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use isochrone_graph::tools::save_graph_to_file;
use isochrone_graph::{Edge, Graph, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, ValueEnum)]
enum GraphType {
    Uniform,
    Grid,
    Tree,
    Ring,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Header line plus one "source destination weight" line per edge
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "data_generator")]
#[command(about = "Generate weighted directed graphs for testing and benchmarking", long_about = None)]
struct Args {
    /// Type of graph to generate
    #[arg(short, long, value_enum)]
    graph_type: GraphType,

    /// Number of vertices
    #[arg(short = 'n', long, default_value_t = 1000)]
    vertices: usize,

    /// Average out-degree for uniform graphs
    #[arg(short = 'd', long, default_value_t = 4)]
    avg_degree: usize,

    /// Grid size (for grid graphs, creates size×size grid)
    #[arg(short = 's', long)]
    size: Option<usize>,

    /// Tree branching factor
    #[arg(short = 'b', long, default_value_t = 3)]
    branching: usize,

    /// Smallest edge weight
    #[arg(long, default_value_t = 1)]
    min_weight: u32,

    /// Largest edge weight
    #[arg(long, default_value_t = 100)]
    max_weight: u32,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct GraphData {
    vertices: Vec<VertexId>,
    edges: Vec<Edge>,
}

struct GraphGenerator {
    rng: StdRng,
    min_weight: u32,
    max_weight: u32,
}

impl GraphGenerator {
    fn new(seed: u64, min_weight: u32, max_weight: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_weight,
            max_weight,
        }
    }

    fn weight(&mut self) -> i64 {
        i64::from(self.rng.gen_range(self.min_weight..=self.max_weight))
    }

    fn empty(n: usize) -> Result<Graph> {
        let mut graph = Graph::new();
        graph.resize(n as i64)?;
        Ok(graph)
    }

    /// Random directed graph with a fixed average out-degree
    fn generate_uniform(&mut self, n: usize, avg_degree: usize) -> Result<Graph> {
        println!("Generating uniform random graph with {} vertices, avg out-degree {}...", n, avg_degree);

        let mut graph = Self::empty(n)?;
        if n < 2 {
            return Ok(graph);
        }

        let target = (n * avg_degree).min(n * (n - 1));
        let mut attempts = 0;
        while graph.edge_count() < target && attempts < target * 10 {
            let source = self.rng.gen_range(0..n) as i64;
            let destination = self.rng.gen_range(0..n) as i64;
            if source != destination && !graph.has_edge(source, destination) {
                let weight = self.weight();
                graph.add_edge(source, destination, weight)?;
            }
            attempts += 1;
        }

        Ok(graph)
    }

    /// Grid with edges in both directions between horizontal and vertical neighbours
    fn generate_grid(&mut self, rows: usize, cols: usize) -> Result<Graph> {
        println!("Generating {}×{} grid graph...", rows, cols);

        let mut graph = Self::empty(rows * cols)?;
        let id = |r: usize, c: usize| (r * cols + c) as i64;

        for r in 0..rows {
            for c in 0..cols {
                let mut neighbours = Vec::with_capacity(2);
                if c + 1 < cols {
                    neighbours.push(id(r, c + 1));
                }
                if r + 1 < rows {
                    neighbours.push(id(r + 1, c));
                }
                for neighbour in neighbours {
                    let forward = self.weight();
                    let backward = self.weight();
                    graph.add_edge(id(r, c), neighbour, forward)?;
                    graph.add_edge(neighbour, id(r, c), backward)?;
                }
            }
        }

        Ok(graph)
    }

    /// Tree with edges pointing away from the root (vertex 0)
    fn generate_tree(&mut self, n: usize, branching: usize) -> Result<Graph> {
        println!("Generating tree with {} vertices and branching factor {}...", n, branching);

        let mut graph = Self::empty(n)?;
        let branching = branching.max(1);
        for child in 1..n {
            let parent = (child - 1) / branching;
            let weight = self.weight();
            graph.add_edge(parent as i64, child as i64, weight)?;
        }

        Ok(graph)
    }

    /// Directed cycle 0 -> 1 -> ... -> n-1 -> 0
    fn generate_ring(&mut self, n: usize) -> Result<Graph> {
        println!("Generating ring with {} vertices...", n);

        let mut graph = Self::empty(n)?;
        if n < 2 {
            return Ok(graph);
        }
        for i in 0..n {
            let weight = self.weight();
            graph.add_edge(i as i64, ((i + 1) % n) as i64, weight)?;
        }

        Ok(graph)
    }
}

fn export_json(graph: &Graph, path: &Path) -> Result<()> {
    let data = GraphData {
        vertices: graph.vertices().collect(),
        edges: graph.edges().collect(),
    };
    let file = File::create(path).context("Failed to create output file")?;
    serde_json::to_writer_pretty(BufWriter::new(file), &data)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.min_weight > args.max_weight {
        anyhow::bail!(
            "--min-weight ({}) must not exceed --max-weight ({})",
            args.min_weight,
            args.max_weight
        );
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let mut generator = GraphGenerator::new(args.seed, args.min_weight, args.max_weight);

    let graph = match args.graph_type {
        GraphType::Uniform => generator.generate_uniform(args.vertices, args.avg_degree)?,
        GraphType::Grid => {
            let size = args.size.unwrap_or((args.vertices as f64).sqrt().ceil() as usize);
            generator.generate_grid(size, size)?
        }
        GraphType::Tree => generator.generate_tree(args.vertices, args.branching)?,
        GraphType::Ring => generator.generate_ring(args.vertices)?,
    };

    match args.format {
        OutputFormat::Text => {
            save_graph_to_file(&graph, &args.output).context("Failed to write graph file")?;
        }
        OutputFormat::Json => export_json(&graph, &args.output)?,
    }

    println!("\n✅ Data generation complete!");
    println!("Output file: {:?}", args.output);
    println!("Graph statistics:");
    println!("  - Vertices: {}", graph.vertex_count());
    println!("  - Edges: {}", graph.edge_count());
    if !graph.is_empty() {
        let avg_degree = graph.edge_count() as f64 / graph.vertex_count() as f64;
        println!("  - Average out-degree: {:.2}", avg_degree);
    }

    Ok(())
}
