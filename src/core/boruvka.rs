/*!
# Parallel Borůvka

The one MST kernel that runs on every rank for its entire duration. Rank 0
broadcasts the vertex/edge counts, the edge list is scattered once across
the cluster (the same partition guard and chunking the parallel sort uses
applies here too), and then every rank repeats, for at most
`ceil(log2 V)` rounds:

1. scan its local edge chunk for the lightest edge leaving each of its
   disjoint-set components ("closest edge"),
2. combine every rank's closest-edge array with a recursive-doubling
   reduce whose operator is an element-wise "keep the lighter, and on a
   tie keep the incumbent" (associative and commutative),
3. broadcast the combined array back out and union every edge in it that
   still crosses a component boundary.

Every rank replays the same union sequence from the same broadcast data, so
their local [`DisjointSet`] copies stay in lockstep without further
communication; only rank 0 accumulates the MST edge list.
*/

use tracing::debug;

use crate::core::cluster::Cluster;
use crate::core::error::MstError;
use crate::core::mst::MstResult;
use crate::core::types::{Edge, VertexId, WeightedGraph};
use crate::core::union_find::DisjointSet;

const NONE_WEIGHT: i64 = i64::MAX;

/// Runs the distributed Borůvka kernel on every rank of `cluster`.
///
/// `graph` need only be populated on the root rank; other ranks may pass an
/// empty graph with the correct `vertex_count` (the edge list itself is
/// communicated by [`Cluster::scatter_edges`]).
pub fn boruvka(cluster: &Cluster, graph: &WeightedGraph) -> Result<MstResult, MstError> {
    let header = cluster.broadcast(if cluster.is_root() {
        Some(vec![graph.vertex_count() as i64, graph.edge_count() as i64])
    } else {
        None
    });
    let vertex_count = header[0] as usize;

    if vertex_count == 0 {
        return Err(MstError::EmptyGraph);
    }

    let root_edges = graph.edges();
    let local_edges = cluster.scatter_edges(if cluster.is_root() { Some(&root_edges) } else { None })?;

    let mut dsu = DisjointSet::new(vertex_count);
    let mut mst_edges: Vec<Edge> = Vec::with_capacity(vertex_count.saturating_sub(1));
    let mut edges_in_mst = 0usize;
    let mut i = 1usize;

    while i < vertex_count && edges_in_mst < vertex_count - 1 {
        // weight, from, to packed per vertex slot, keyed by canonical id.
        let mut closest = vec![NONE_WEIGHT; vertex_count * 3];

        for edge in &local_edges {
            let ru = dsu.find_set(edge.from);
            let rv = dsu.find_set(edge.to);
            if ru == rv {
                continue;
            }
            install_if_lighter(&mut closest, ru, edge.weight, edge.from, edge.to);
            install_if_lighter(&mut closest, rv, edge.weight, edge.from, edge.to);
        }

        let reduced = recursive_doubling_min_reduce(cluster, closest);
        let global = cluster.broadcast(if cluster.is_root() { Some(reduced) } else { None });

        for v in 0..vertex_count {
            let weight = global[v * 3];
            if weight == NONE_WEIGHT {
                continue;
            }
            let from = VertexId::from(global[v * 3 + 1] as usize);
            let to = VertexId::from(global[v * 3 + 2] as usize);
            if dsu.find_set(from) != dsu.find_set(to) {
                dsu.union_set(from, to);
                edges_in_mst += 1;
                if cluster.is_root() {
                    mst_edges.push(Edge::new(from, to, weight as i32));
                }
            }
        }

        debug!(
            rank = cluster.rank(),
            round = i,
            edges_in_mst,
            "boruvka: round complete"
        );
        i *= 2;
    }

    Ok(MstResult::from_sorted_edges(mst_edges))
}

fn install_if_lighter(closest: &mut [i64], root: VertexId, weight: i32, from: VertexId, to: VertexId) {
    let slot = root.index() * 3;
    if closest[slot] == NONE_WEIGHT || i64::from(weight) < closest[slot] {
        closest[slot] = i64::from(weight);
        closest[slot + 1] = from.index() as i64;
        closest[slot + 2] = to.index() as i64;
    }
}

/// Recursive-doubling reduce with an element-wise "keep the lighter slot"
/// combine, the same communication shape [`crate::core::sort`] uses for the
/// parallel merge sort but with a fixed-size payload instead of a growing
/// sorted run.
fn recursive_doubling_min_reduce(cluster: &Cluster, mut local: Vec<i64>) -> Vec<i64> {
    let mut active = true;
    let mut stride = 1;
    while stride < cluster.size() {
        if active {
            if cluster.rank() % (2 * stride) == 0 {
                let partner = cluster.rank() + stride;
                if partner < cluster.size() {
                    let incoming = cluster.recv_from(partner);
                    for slot in (0..local.len()).step_by(3) {
                        if incoming[slot] != NONE_WEIGHT
                            && (local[slot] == NONE_WEIGHT || incoming[slot] < local[slot])
                        {
                            local[slot] = incoming[slot];
                            local[slot + 1] = incoming[slot + 1];
                            local[slot + 2] = incoming[slot + 2];
                        }
                    }
                }
            } else if cluster.rank() % stride == 0 {
                let partner = cluster.rank() - stride;
                cluster.send_to(partner, local.clone());
                active = false;
            }
        }
        stride *= 2;
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WeightedGraph {
        let mut g = WeightedGraph::new(3);
        g.push_edge(VertexId::from(0usize), VertexId::from(1usize), 1);
        g.push_edge(VertexId::from(1usize), VertexId::from(2usize), 2);
        g.push_edge(VertexId::from(0usize), VertexId::from(2usize), 3);
        g
    }

    fn linear_chain() -> WeightedGraph {
        let mut g = WeightedGraph::new(8);
        for i in 0..7u32 {
            g.push_edge(VertexId::new(i), VertexId::new(i + 1), (i + 1) as i32);
        }
        g
    }

    #[test]
    fn single_rank_boruvka_matches_kruskal() {
        let graph = triangle();
        let kruskal = crate::core::mst::kruskal(&graph).unwrap();
        let results = Cluster::launch(1, move |cluster| boruvka(&cluster, &graph).unwrap());
        assert_eq!(results[0].total_weight, kruskal.total_weight);
        assert_eq!(results[0].edges.len(), 2);
    }

    #[test]
    fn multi_rank_boruvka_matches_single_rank_on_a_chain() {
        let graph = linear_chain();
        let single = Cluster::launch(1, {
            let graph = graph.clone();
            move |cluster| boruvka(&cluster, &graph).unwrap()
        });
        let multi = Cluster::launch(4, move |cluster| {
            let local_graph = if cluster.is_root() { graph.clone() } else { WeightedGraph::new(8) };
            boruvka(&cluster, &local_graph).unwrap()
        });
        assert_eq!(single[0].total_weight, multi[0].total_weight);
        assert_eq!(multi[0].total_weight, 28);
    }

    #[test]
    fn empty_graph_is_rejected() {
        let results = Cluster::launch(1, |cluster| boruvka(&cluster, &WeightedGraph::new(0)));
        assert!(matches!(results[0], Err(MstError::EmptyGraph)));
    }
}
