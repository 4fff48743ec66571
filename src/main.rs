//! CLI entry point: parses the flags in `core::cli`, optionally (re)writes a
//! maze file, reads the graph file, dispatches the selected MST kernel, and
//! reports the result. See `core::cli::usage` for the full flag list.

use std::process::ExitCode;

use rand::Rng;
use tracing::{Level, info};

use mst_engine::core::boruvka::boruvka;
use mst_engine::core::cli::{Algorithm, CliAction, Config, parse_args, print_edges, usage};
use mst_engine::core::cluster::Cluster;
use mst_engine::core::error::MstError;
use mst_engine::core::io::read_graph_file;
use mst_engine::core::maze::{render_maze, write_new_maze};
use mst_engine::core::mst::{MstResult, kruskal_presorted, prim_binary, prim_fibonacci};
use mst_engine::core::sort::parallel_sort;
use mst_engine::core::types::WeightedGraph;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match parse_args(&args) {
        Ok(CliAction::Help) => {
            println!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Ok(CliAction::Run(config)) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if config.verbose {
        let _ = tracing_subscriber::fmt().with_max_level(Level::DEBUG).try_init();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the configured pipeline: optional maze (re)generation, the graph
/// read, the selected kernel, and the verbose/maze-render reporting.
fn run(config: &Config) -> Result<(), MstError> {
    if config.new_maze {
        let seed = rand::rng().random::<u64>();
        write_new_maze(&config.file_path, config.rows, config.columns, seed)?;
        info!(path = %config.file_path, rows = config.rows, columns = config.columns, "wrote new maze file");
    }

    let graph = read_graph_file(&config.file_path)?;

    if config.verbose {
        print_edges("graph", &graph.edges());
    }

    let result = dispatch(config.algorithm, &graph)?;
    info!(
        algorithm = %config.algorithm,
        total_weight = result.total_weight,
        edges = result.edges.len(),
        "mst computed"
    );

    if config.verbose {
        print_edges("mst", &result.edges);
    }
    println!("total MST weight: {}", result.total_weight);

    if config.render_maze {
        println!("{}", render_maze(config.rows, config.columns, &result.edges));
    }

    Ok(())
}

/// Runs the kernel named by `algorithm` over `graph`.
///
/// Kruskal and Borůvka are the distributed kernels: they run across a
/// simulated cluster sized to the host's available parallelism (the CLI
/// surface has no rank-count flag of its own — the rank count is an
/// execution-environment detail, not a graph parameter, so it is derived
/// rather than asked for). Both Prim variants run sequentially.
fn dispatch(algorithm: Algorithm, graph: &WeightedGraph) -> Result<MstResult, MstError> {
    match algorithm {
        Algorithm::Kruskal => run_kruskal(graph),
        Algorithm::PrimBinary => prim_binary(graph),
        Algorithm::PrimFibonacci => prim_fibonacci(graph),
        Algorithm::Boruvka => run_boruvka(graph),
    }
}

/// Picks a cluster size for the distributed kernels: the host's available
/// parallelism, clamped down so the scatter guard in
/// `Cluster::scatter_edges` (`E < 2*size - 1 && E != size`) never trips for
/// a graph that would otherwise spread fine across fewer ranks. Without
/// this clamp a small default maze would abort on any machine with more
/// cores than it has edges to distribute.
fn rank_count(edge_count: usize) -> usize {
    let available = std::thread::available_parallelism().map(std::num::NonZeroUsize::get).unwrap_or(1);
    available.min(edge_count.div_ceil(2)).max(1)
}

fn run_kruskal(graph: &WeightedGraph) -> Result<MstResult, MstError> {
    let size = rank_count(graph.edge_count());
    let results = Cluster::launch(size, move |cluster| {
        let mut local_graph = graph.clone();
        parallel_sort(&cluster, &mut local_graph)?;
        if cluster.is_root() {
            Ok(Some(kruskal_presorted(&local_graph)?))
        } else {
            Ok(None)
        }
    });
    root_result(results)
}

fn run_boruvka(graph: &WeightedGraph) -> Result<MstResult, MstError> {
    let size = rank_count(graph.edge_count());
    let vertex_count = graph.vertex_count();
    let results = Cluster::launch(size, move |cluster| {
        let local_graph = if cluster.is_root() {
            graph.clone()
        } else {
            WeightedGraph::new(vertex_count)
        };
        boruvka(&cluster, &local_graph).map(Some)
    });
    root_result(results)
}

/// Every rank returns `Result<Option<MstResult>, MstError>`; only rank 0's
/// slot (index 0) carries `Some`. Propagates the first error seen.
fn root_result(results: Vec<Result<Option<MstResult>, MstError>>) -> Result<MstResult, MstError> {
    for result in results {
        if let Some(mst) = result? {
            return Ok(mst);
        }
    }
    Err(MstError::EmptyGraph)
}
