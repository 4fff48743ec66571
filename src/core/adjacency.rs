/*!
# Adjacency List

A per-vertex list of `(neighbor, weight)` pairs, built once from a
[`WeightedGraph`](crate::core::types::WeightedGraph)'s edge list and used by
both Prim variants. It is not mutated once built.
*/

use crate::core::types::{VertexId, WeightedGraph};

/// A growable per-vertex adjacency list.
#[derive(Debug, Clone)]
pub struct AdjacencyList {
    neighbors: Vec<Vec<(VertexId, i32)>>,
}

impl AdjacencyList {
    /// Builds the adjacency list for every edge in `graph`.
    ///
    /// For every edge `(u, v, w)`, `(v, w)` is appended to `list[u]` and
    /// `(u, w)` to `list[v]`, so `sum(list[v].len()) == 2 * edge_count`.
    #[must_use]
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        let mut neighbors = vec![Vec::with_capacity(4); graph.vertex_count()];
        for edge in graph.edges() {
            neighbors[edge.from.index()].push((edge.to, edge.weight));
            neighbors[edge.to.index()].push((edge.from, edge.weight));
        }
        AdjacencyList { neighbors }
    }

    /// Returns the `(neighbor, weight)` pairs incident to `v`.
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, i32)] {
        &self.neighbors[v.index()]
    }

    /// The number of vertices this adjacency list was built over.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }
}
