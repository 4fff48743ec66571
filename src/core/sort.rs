/*!
# Sequential Merge Sort

Sorts an edge slice by ascending weight, stable on ties. The merge step uses
a "bitonic copy" layout: the left run is copied forward and the right run
copied in reverse into a scratch buffer, so the two halves together form a
single ascending-then-descending (bitonic) sequence. Two pointers then walk
in from both ends of that buffer, always taking the smaller end, which
produces the fully sorted order without any bounds check against the
original run lengths.

[`merge_runs`] is reused by the parallel sort kernel to merge two runs that
arrived from different ranks.
*/

use tracing::debug;

use crate::core::cluster::{Cluster, edges_to_wire, wire_to_edges};
use crate::core::error::MstError;
use crate::core::types::{Edge, WeightedGraph};

/// Sorts `edges` by ascending weight using a top-down merge sort.
pub fn merge_sort_by_weight(edges: &mut [Edge]) {
    let len = edges.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    let (left, right) = edges.split_at_mut(mid);
    merge_sort_by_weight(left);
    merge_sort_by_weight(right);
    merge_runs(edges, mid);
}

/// Merges the two already-sorted runs `slice[..left_len]` and
/// `slice[left_len..]` in place.
pub fn merge_runs(slice: &mut [Edge], left_len: usize) {
    if slice.len() <= 1 {
        return;
    }
    let mut buffer = Vec::with_capacity(slice.len());
    buffer.extend_from_slice(&slice[..left_len]);
    buffer.extend(slice[left_len..].iter().rev().copied());

    let mut left = 0;
    let mut right = buffer.len() - 1;
    for slot in slice.iter_mut() {
        if buffer[left].weight <= buffer[right].weight {
            *slot = buffer[left];
            left += 1;
        } else {
            *slot = buffer[right];
            right -= 1;
        }
    }
}

/// Sorts `graph`'s edge list across every rank of `cluster` and leaves the
/// globally sorted result in `graph` on rank 0.
///
/// Scatters `graph`'s edges (present only on the root), sorts each rank's
/// chunk locally, then combines chunks with a recursive-doubling pairwise
/// merge: at each step `s`, a receiving rank merges in its partner's
/// already-sorted run with [`merge_runs`]; a sending rank ships its run to
/// `rank - s` and is idle for every later step. `graph` is only mutated on
/// rank 0; other ranks may pass any graph with the same vertex count.
pub fn parallel_sort(cluster: &Cluster, graph: &mut WeightedGraph) -> Result<(), MstError> {
    let root_edges = graph.edges();
    let mut local_edges =
        cluster.scatter_edges(if cluster.is_root() { Some(&root_edges) } else { None })?;
    debug!(rank = cluster.rank(), chunk = local_edges.len(), "sort: chunk scattered");
    merge_sort_by_weight(&mut local_edges);

    let mut active = true;
    let mut stride = 1;
    while stride < cluster.size() {
        if active {
            if cluster.rank() % (2 * stride) == 0 {
                let partner = cluster.rank() + stride;
                if partner < cluster.size() {
                    let incoming = wire_to_edges(cluster.recv_from(partner));
                    let left_len = local_edges.len();
                    local_edges.extend(incoming);
                    merge_runs(&mut local_edges, left_len);
                }
            } else if cluster.rank() % stride == 0 {
                let partner = cluster.rank() - stride;
                cluster.send_to(partner, edges_to_wire(&local_edges));
                active = false;
            }
        }
        stride *= 2;
    }

    if cluster.is_root() {
        debug!(total = local_edges.len(), "sort: globally sorted edge list assembled");
        let mut flat = Vec::with_capacity(local_edges.len() * 3);
        for edge in &local_edges {
            flat.push(edge.from.index() as i32);
            flat.push(edge.to.index() as i32);
            flat.push(edge.weight);
        }
        graph.set_flat(flat);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VertexId;

    fn edge(weight: i32) -> Edge {
        Edge::new(VertexId::from(0), VertexId::from(1), weight)
    }

    #[test]
    fn sorts_ascending_by_weight() {
        let mut edges: Vec<Edge> = [5, 1, 4, 2, 8, 0, 3].into_iter().map(edge).collect();
        merge_sort_by_weight(&mut edges);
        let weights: Vec<i32> = edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![0, 1, 2, 3, 4, 5, 8]);
    }

    #[test]
    fn empty_and_singleton_slices_are_no_ops() {
        let mut empty: Vec<Edge> = Vec::new();
        merge_sort_by_weight(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![edge(7)];
        merge_sort_by_weight(&mut one);
        assert_eq!(one[0].weight, 7);
    }

    #[test]
    fn ties_preserve_relative_order_of_equal_weights() {
        let mut edges = vec![
            Edge::new(VertexId::from(0), VertexId::from(1), 3),
            Edge::new(VertexId::from(1), VertexId::from(2), 1),
            Edge::new(VertexId::from(2), VertexId::from(3), 1),
            Edge::new(VertexId::from(3), VertexId::from(4), 1),
        ];
        merge_sort_by_weight(&mut edges);
        let ones: Vec<VertexId> = edges
            .iter()
            .filter(|e| e.weight == 1)
            .map(|e| e.from)
            .collect();
        assert_eq!(
            ones,
            vec![VertexId::from(1), VertexId::from(2), VertexId::from(3)]
        );
    }

    proptest::proptest! {
        #[test]
        fn result_is_a_sorted_permutation(weights in proptest::collection::vec(-500i32..500, 0..80)) {
            let mut edges: Vec<Edge> = weights.iter().copied().map(edge).collect();
            let mut expected = weights.clone();
            expected.sort_unstable();

            merge_sort_by_weight(&mut edges);
            let got: Vec<i32> = edges.iter().map(|e| e.weight).collect();
            proptest::prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn parallel_sort_matches_sequential_on_four_ranks() {
        let mut graph = WeightedGraph::new(2);
        for w in [9, 1, 5, 3, 7, 2, 8, 4, 6, 0] {
            graph.push_edge(VertexId::from(0), VertexId::from(1), w);
        }
        let mut sequential = graph.clone();
        let mut sequential_edges = sequential.edges();
        merge_sort_by_weight(&mut sequential_edges);

        let results = Cluster::launch(4, move |cluster| {
            let mut graph = graph.clone();
            parallel_sort(&cluster, &mut graph).unwrap();
            if cluster.is_root() { Some(graph.edges()) } else { None }
        });
        let sorted = results.into_iter().flatten().next().unwrap();
        let weights: Vec<i32> = sorted.iter().map(|e| e.weight).collect();
        let expected: Vec<i32> = sequential_edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, expected);

        let _ = &mut sequential;
    }

    #[test]
    fn parallel_sort_on_a_single_rank_matches_sequential() {
        let mut graph = WeightedGraph::new(2);
        for w in [4, 2, 9, 0] {
            graph.push_edge(VertexId::from(0), VertexId::from(1), w);
        }
        let mut sequential_edges = graph.edges();
        merge_sort_by_weight(&mut sequential_edges);

        let results = Cluster::launch(1, move |cluster| {
            let mut graph = graph.clone();
            parallel_sort(&cluster, &mut graph).unwrap();
            graph.edges()
        });
        let weights: Vec<i32> = results[0].iter().map(|e| e.weight).collect();
        let expected: Vec<i32> = sequential_edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, expected);
    }
}
