use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use isochrone_graph::config::{init_logging, Config};
use isochrone_graph::{Distance, ShortestPathStrategy, Session};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "graph_cli", version = isochrone_graph::VERSION)]
#[command(about = "Query and edit weighted directed graph files", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Override SHORTEST_PATH_STRATEGY (linear-scan or binary-heap)
    #[arg(long, global = true)]
    strategy: Option<ShortestPathStrategy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Vertex and edge counts
    Info { file: PathBuf },

    /// Outgoing edges of a vertex
    Neighbors { file: PathBuf, vertex: i64 },

    /// Incoming edges of a vertex
    Predecessors { file: PathBuf, vertex: i64 },

    /// Weight of a single edge
    Edge {
        file: PathBuf,
        source: i64,
        destination: i64,
    },

    /// Distances and predecessors from a source vertex
    ShortestPath {
        file: PathBuf,
        source: i64,

        /// Only print the path to this vertex
        #[arg(long)]
        to: Option<i64>,

        /// Print the distance table after each settled vertex
        #[arg(long)]
        steps: bool,
    },

    /// Vertices within a maximum distance of a source vertex
    Isochrone {
        file: PathBuf,
        source: i64,
        max_distance: i64,
    },

    /// Apply mutations and save the result
    Mutate(MutateArgs),

    /// Make the vertex set exactly 0..size and save the result
    Resize {
        file: PathBuf,

        /// New vertex count, at most 16777216
        size: i64,

        /// Write here instead of overwriting the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
struct MutateArgs {
    file: PathBuf,

    #[arg(long = "add-vertex", value_name = "ID")]
    add_vertices: Vec<i64>,

    #[arg(long = "add-edge", value_name = "S,D,W", value_parser = parse_triple)]
    add_edges: Vec<(i64, i64, i64)>,

    #[arg(long = "remove-edge", value_name = "S,D", value_parser = parse_pair)]
    remove_edges: Vec<(i64, i64)>,

    #[arg(long = "remove-vertex", value_name = "ID")]
    remove_vertices: Vec<i64>,

    /// Write here instead of overwriting the input file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_numbers(s: &str, expected: usize) -> Result<Vec<i64>, String> {
    let numbers = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.len() != expected {
        return Err(format!("expected {} comma-separated integers", expected));
    }
    Ok(numbers)
}

fn parse_triple(s: &str) -> Result<(i64, i64, i64), String> {
    let n = parse_numbers(s, 3)?;
    Ok((n[0], n[1], n[2]))
}

fn parse_pair(s: &str) -> Result<(i64, i64), String> {
    let n = parse_numbers(s, 2)?;
    Ok((n[0], n[1]))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open(file: &Path, config: &Config) -> Result<Session> {
    let (session, stats) = Session::open(file, config.clone())
        .with_context(|| format!("Failed to load graph from {}", file.display()))?;
    for error in &stats.errors {
        eprintln!("warning: {}", error);
    }
    for warning in &stats.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(session)
}

fn save(session: &mut Session, output: Option<PathBuf>) -> Result<usize> {
    let written = match output {
        Some(path) => session.save_as(&path),
        None => session.save(),
    }
    .context("Failed to save graph")?;
    Ok(written)
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Info { file } => {
            let session = open(&file, &config)?;
            let graph = session.graph();
            if cli.json {
                print_json(&json!({
                    "vertices": graph.vertex_count(),
                    "edges": graph.edge_count(),
                }))?;
            } else {
                println!("Vertices: {}", graph.vertex_count());
                println!("Edges: {}", graph.edge_count());
            }
        }

        Command::Neighbors { file, vertex } => {
            let session = open(&file, &config)?;
            let neighbors = session.graph().neighbors(vertex)?;
            if cli.json {
                print_json(neighbors)?;
            } else {
                for (destination, weight) in neighbors {
                    println!("{} -> {} ({})", vertex, destination, weight);
                }
            }
        }

        Command::Predecessors { file, vertex } => {
            let session = open(&file, &config)?;
            let predecessors = session.graph().predecessors(vertex)?;
            if cli.json {
                print_json(&predecessors)?;
            } else {
                for (source, weight) in &predecessors {
                    println!("{} -> {} ({})", source, vertex, weight);
                }
            }
        }

        Command::Edge {
            file,
            source,
            destination,
        } => {
            let session = open(&file, &config)?;
            let weight = session.graph().edge_weight(source, destination)?;
            if cli.json {
                print_json(&json!({
                    "source": source,
                    "destination": destination,
                    "weight": weight,
                }))?;
            } else {
                println!("{} -> {} ({})", source, destination, weight);
            }
        }

        Command::ShortestPath {
            file,
            source,
            to,
            steps,
        } => {
            let mut config = config;
            config.algorithm.record_steps |= steps;
            let mut session = open(&file, &config)?;
            let result = session.shortest_path(source)?;

            if let Some(target) = to {
                let path = result
                    .path_to(target)
                    .with_context(|| format!("Vertex {} is not reachable from {}", target, source))?;
                if cli.json {
                    print_json(&path)?;
                } else {
                    let hops: Vec<String> = path.vertices.iter().map(|v| v.to_string()).collect();
                    println!("{} (total {})", hops.join(" -> "), path.total_weight());
                }
            } else if cli.json {
                print_json(result)?;
            } else {
                for step in &result.steps {
                    let row: Vec<String> = step.distances.values().map(Distance::to_string).collect();
                    println!("settled {:>6}: {}", step.vertex.to_string(), row.join(" "));
                }
                println!("{:>8} {:>10} {:>12}", "vertex", "distance", "predecessor");
                for (vertex, distance) in &result.distances {
                    let predecessor = result
                        .predecessors
                        .get(vertex)
                        .copied()
                        .flatten()
                        .map_or_else(|| "-".to_string(), |p| p.to_string());
                    println!(
                        "{:>8} {:>10} {:>12}",
                        vertex.to_string(),
                        distance.to_string(),
                        predecessor
                    );
                }
            }
        }

        Command::Isochrone {
            file,
            source,
            max_distance,
        } => {
            let mut session = open(&file, &config)?;
            let isochrone = session.isochrone(source, max_distance)?;
            if cli.json {
                print_json(&isochrone)?;
            } else {
                let ids: Vec<String> = isochrone.iter().map(|v| v.to_string()).collect();
                println!(
                    "{} vertices within {} of {}: {}",
                    isochrone.len(),
                    max_distance,
                    source,
                    ids.join(" ")
                );
            }
        }

        Command::Mutate(args) => {
            let mut session = open(&args.file, &config)?;
            for vertex in &args.add_vertices {
                session.add_vertex(*vertex)?;
            }
            for (source, destination, weight) in &args.add_edges {
                session.add_edge(*source, *destination, *weight)?;
            }
            for (source, destination) in &args.remove_edges {
                session.remove_edge(*source, *destination)?;
            }
            for vertex in &args.remove_vertices {
                session.remove_vertex(*vertex)?;
            }
            let written = save(&mut session, args.output)?;
            println!(
                "Saved {} vertices and {} edges",
                session.graph().vertex_count(),
                written
            );
        }

        Command::Resize { file, size, output } => {
            let mut session = open(&file, &config)?;
            session.resize(size)?;
            let written = save(&mut session, output)?;
            println!(
                "Saved {} vertices and {} edges",
                session.graph().vertex_count(),
                written
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(strategy) = cli.strategy {
        config.algorithm.strategy = strategy;
    }
    init_logging(&config.logging)?;

    tracing::debug!("Configuration: {:?}", config);

    run(cli, config)
}
