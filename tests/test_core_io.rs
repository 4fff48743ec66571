//! Integration tests for the graph-file reader/writer and the maze
//! generator's round trip through them.

use mst_engine::core::error::MstError;
use mst_engine::core::io::{read_graph_file, write_graph_file};
use mst_engine::core::maze::{generate_grid_maze, write_new_maze};
use mst_engine::core::types::{Edge, VertexId, WeightedGraph};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("mst_engine_{label}_{}_{}.csv", std::process::id(), label.len()))
}

#[test]
fn writes_then_reads_back_an_identical_graph() {
    let path = temp_path("roundtrip");
    let mut graph = WeightedGraph::new(4);
    graph.push_edge(VertexId::from(0usize), VertexId::from(1usize), 10);
    graph.push_edge(VertexId::from(1usize), VertexId::from(2usize), 20);
    graph.push_edge(VertexId::from(2usize), VertexId::from(3usize), 30);

    write_graph_file(&path, &graph).unwrap();
    let read_back = read_graph_file(&path).unwrap();

    assert_eq!(read_back.vertex_count(), graph.vertex_count());
    assert_eq!(read_back.edges(), graph.edges());

    std::fs::remove_file(&path).unwrap();
}

/// A 5x5 maze round-trips through the file format with the exact
/// vertex/edge counts the generator's invariant promises, and every
/// parsed edge matches a tuple the generator actually emitted.
#[test]
fn generated_maze_round_trips_through_the_file_reader() {
    let path = temp_path("generated_maze");
    let seed = 2026;
    let generated = generate_grid_maze(5, 5, seed);
    write_new_maze(&path, 5, 5, seed).unwrap();

    let read_back = read_graph_file(&path).unwrap();

    assert_eq!(read_back.vertex_count(), 25);
    assert_eq!(read_back.edge_count(), 40);
    assert_eq!(read_back.edge_count(), generated.edge_count());

    let generated_set: std::collections::HashSet<(u32, u32, i32)> = generated
        .edges()
        .iter()
        .map(|e| (e.from.index() as u32, e.to.index() as u32, e.weight))
        .collect();
    for Edge { from, to, weight } in read_back.edges() {
        assert!(generated_set.contains(&(from.index() as u32, to.index() as u32, weight)));
    }

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn rejects_a_file_with_too_few_edge_lines() {
    let path = temp_path("short");
    std::fs::write(&path, "3 3\n0 1 5\n1 2 5\n").unwrap();

    let result = read_graph_file(&path);
    assert!(matches!(result, Err(MstError::MalformedGraphFile(_))));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn rejects_a_nonexistent_file() {
    let result = read_graph_file("/nonexistent/mst_engine/graph.csv");
    assert!(matches!(result, Err(MstError::Io(_))));
}

#[test]
fn empty_graph_file_round_trips() {
    let path = temp_path("empty");
    let graph = WeightedGraph::new(3);
    write_graph_file(&path, &graph).unwrap();

    let read_back = read_graph_file(&path).unwrap();
    assert_eq!(read_back.vertex_count(), 3);
    assert_eq!(read_back.edge_count(), 0);

    std::fs::remove_file(&path).unwrap();
}
