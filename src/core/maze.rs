/*!
# Grid-Maze Generator and Renderer

Two narrow, line-oriented collaborators that sit outside the MST engine's
hard engineering: a generator that writes a random 2D grid graph to disk
in the [`crate::core::io`] format, and a renderer that draws a computed
MST back onto that grid as ASCII art.

Vertex `i` at row `r`, column `c` is `r * columns + c`. The generator emits,
for every vertex in row-major order, a horizontal edge to its right
neighbour (if one exists) and a vertical edge to the neighbour below it (if
one exists); weights are uniform in `[0, 100)`. This produces exactly
`rows * columns * 2 - rows - columns` edges.
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::MstError;
use crate::core::io::write_graph_file;
use crate::core::types::{Edge, VertexId, WeightedGraph};
use std::path::Path;

/// Builds a random `rows x columns` grid graph, seeded for reproducibility.
#[must_use]
pub fn generate_grid_maze(rows: usize, columns: usize, seed: u64) -> WeightedGraph {
    let vertex_count = rows * columns;
    let mut graph = WeightedGraph::new(vertex_count);
    let mut rng = StdRng::seed_from_u64(seed);

    let index = |row: usize, col: usize| row * columns + col;

    for row in 0..rows {
        for col in 0..columns {
            let here = index(row, col);
            if col + 1 < columns {
                let weight = rng.random_range(0..100);
                graph.push_edge(VertexId::from(here), VertexId::from(index(row, col + 1)), weight);
            }
            if row + 1 < rows {
                let weight = rng.random_range(0..100);
                graph.push_edge(VertexId::from(here), VertexId::from(index(row + 1, col)), weight);
            }
        }
    }

    graph
}

/// Generates a grid maze and writes it to `path` in the graph file format.
pub fn write_new_maze(path: impl AsRef<Path>, rows: usize, columns: usize, seed: u64) -> Result<(), MstError> {
    let graph = generate_grid_maze(rows, columns, seed);
    write_graph_file(path, &graph)
}

/// Renders `mst_edges` over a `rows x columns` grid as ASCII art.
///
/// The output is `(2 * rows - 1) x (2 * columns - 1)` characters: vertices
/// sit at even row/column positions as `+`, an MST edge between horizontal
/// neighbours draws a `-` in the cell between them, a vertical-neighbour
/// edge draws a `|`, and every other cell is a space.
#[must_use]
pub fn render_maze(rows: usize, columns: usize, mst_edges: &[Edge]) -> String {
    let height = 2 * rows - 1;
    let width = 2 * columns - 1;
    let mut grid = vec![vec![' '; width]; height];

    for r in 0..rows {
        for c in 0..columns {
            grid[2 * r][2 * c] = '+';
        }
    }

    let position = |v: VertexId| {
        let v = v.index();
        (v / columns, v % columns)
    };

    for edge in mst_edges {
        if edge.from == edge.to {
            continue;
        }
        let (r1, c1) = position(edge.from);
        let (r2, c2) = position(edge.to);
        if r1 == r2 && c1.abs_diff(c2) == 1 {
            let col = c1.min(c2);
            grid[2 * r1][2 * col + 1] = '-';
        } else if c1 == c2 && r1.abs_diff(r2) == 1 {
            let row = r1.min(r2);
            grid[2 * row + 1][2 * c1] = '|';
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_maze_has_the_spec_edge_count() {
        let graph = generate_grid_maze(5, 5, 7);
        assert_eq!(graph.vertex_count(), 25);
        assert_eq!(graph.edge_count(), 5 * 5 * 2 - 5 - 5);
    }

    #[test]
    fn grid_maze_weights_are_in_range() {
        let graph = generate_grid_maze(3, 4, 1);
        for edge in graph.edges() {
            assert!((0..100).contains(&edge.weight));
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = generate_grid_maze(4, 4, 99);
        let b = generate_grid_maze(4, 4, 99);
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn renders_a_two_by_two_grid_with_two_mst_edges() {
        // 0 1
        // 2 3
        let edges = vec![
            Edge::new(VertexId::from(0usize), VertexId::from(1usize), 1),
            Edge::new(VertexId::from(0usize), VertexId::from(2usize), 1),
        ];
        let rendered = render_maze(2, 2, &edges);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "+-+");
        assert_eq!(lines[1], "|  ");
        assert_eq!(lines[2], "+ +");
    }

    #[test]
    fn write_new_maze_round_trips_through_the_file_reader() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("mst_engine_maze_{}.csv", std::process::id()));
        write_new_maze(&path, 3, 3, 5).unwrap();

        let read_back = crate::core::io::read_graph_file(&path).unwrap();
        assert_eq!(read_back.vertex_count(), 9);
        assert_eq!(read_back.edge_count(), 3 * 3 * 2 - 3 - 3);

        std::fs::remove_file(&path).unwrap();
    }
}
