/*!
# Cluster (Message-Passing Coordinator)

Models the bulk-synchronous, single-program-multiple-data execution the
parallel sort and Borůvka kernels run under: `size` ranks execute the same
closure in lock-step with respect to collective calls, each with private
memory and no shared state.

No dependency in this crate's stack links against an MPI binding, so the
cluster is simulated in-process: each rank is an OS thread spawned via
[`std::thread::scope`], and point-to-point messages travel over
`std::sync::mpsc::sync_channel(0)` pairs wired into a full mesh up front —
a zero-capacity channel is a rendezvous, so both `send_to` and `recv_from`
block until their matching counterpart arrives, which is the natural Rust
analogue of a reliable, synchronous transport. Every rank communicates
with every other rank over exactly one dedicated channel pair.

[`Cluster::launch`] is the job launch/teardown boundary: it wires the mesh,
runs the body on every rank, and joins all of them before returning.
*/

use std::sync::mpsc::{self, Receiver, SyncSender};

use tracing::{debug, trace};

use crate::core::error::MstError;
use crate::core::types::{Edge, VertexId};

/// A rank's view of the cluster: its own identity plus one channel pair to
/// every other rank.
pub struct Cluster {
    rank: usize,
    size: usize,
    senders: Vec<Option<SyncSender<Vec<i64>>>>,
    receivers: Vec<Option<Receiver<Vec<i64>>>>,
}

impl Cluster {
    /// Spawns `size` ranks, each running `body` with its own [`Cluster`]
    /// handle, and returns their results in rank order once every rank has
    /// finished.
    ///
    /// This is the crate's equivalent of an MPI job launch and exit: there
    /// is no partial result on failure — if any rank's `body` panics, the
    /// panic propagates out of `launch` once the others are joined.
    pub fn launch<T, F>(size: usize, body: F) -> Vec<T>
    where
        T: Send,
        F: Fn(Cluster) -> T + Sync,
    {
        assert!(size >= 1, "cluster size must be at least 1");
        debug!(size, "launching cluster");

        let mut senders: Vec<Vec<Option<SyncSender<Vec<i64>>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
        let mut receivers: Vec<Vec<Option<Receiver<Vec<i64>>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();

        for i in 0..size {
            for j in 0..size {
                if i == j {
                    continue;
                }
                let (tx, rx) = mpsc::sync_channel(0);
                senders[i][j] = Some(tx);
                receivers[j][i] = Some(rx);
            }
        }

        let clusters: Vec<Cluster> = (0..size)
            .map(|rank| Cluster {
                rank,
                size,
                senders: std::mem::take(&mut senders[rank]),
                receivers: std::mem::take(&mut receivers[rank]),
            })
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = clusters
                .into_iter()
                .map(|cluster| {
                    let body = &body;
                    scope.spawn(move || body(cluster))
                })
                .collect();
            let results = handles
                .into_iter()
                .map(|handle| handle.join().expect("a cluster rank panicked"))
                .collect();
            debug!(size, "cluster ranks joined");
            results
        })
    }

    /// This rank's index in `[0, size)`.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The total number of ranks in the cluster.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether this rank is rank 0, the designated coordinator.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.rank == 0
    }

    /// Blocking send of `payload` to rank `dst`. Blocks until `dst` calls
    /// [`Cluster::recv_from`] with this rank as the source.
    pub fn send_to(&self, dst: usize, payload: Vec<i64>) {
        trace!(rank = self.rank, dst, len = payload.len(), "send_to");
        self.senders[dst]
            .as_ref()
            .unwrap_or_else(|| panic!("rank {} has no channel to rank {dst}", self.rank))
            .send(payload)
            .expect("peer rank dropped its receiver");
    }

    /// Blocking receive from rank `src`. Blocks until `src` calls
    /// [`Cluster::send_to`] with this rank as the destination.
    #[must_use]
    pub fn recv_from(&self, src: usize) -> Vec<i64> {
        let payload = self.receivers[src]
            .as_ref()
            .unwrap_or_else(|| panic!("rank {} has no channel from rank {src}", self.rank))
            .recv()
            .expect("peer rank dropped its sender");
        trace!(rank = self.rank, src, len = payload.len(), "recv_from");
        payload
    }

    /// Broadcasts `value` from rank 0 to every other rank.
    ///
    /// `value` must be `Some` on rank 0 and is ignored elsewhere; every rank
    /// (including rank 0) returns the same vector.
    #[must_use]
    pub fn broadcast(&self, value: Option<Vec<i64>>) -> Vec<i64> {
        if self.is_root() {
            let payload = value.expect("root rank must supply a broadcast value");
            for dst in 1..self.size {
                self.send_to(dst, payload.clone());
            }
            payload
        } else {
            self.recv_from(0)
        }
    }

    /// Scatters `edges` (present only on rank 0) into per-rank chunks of
    /// size `ceil(E / size)`, the last chunk trimmed to whatever remains.
    ///
    /// Aborts with [`MstError::UnsupportedPartition`] if `E < 2*size - 1`
    /// and `E != size`, rather than silently handing some ranks an empty
    /// chunk.
    pub fn scatter_edges(&self, edges: Option<&[Edge]>) -> Result<Vec<Edge>, MstError> {
        let edge_count_buf = self.broadcast(if self.is_root() {
            Some(vec![edges.expect("root must supply edges to scatter").len() as i64])
        } else {
            None
        });
        let edge_count = edge_count_buf[0] as usize;

        if self.size > 1 && edge_count < 2 * self.size - 1 && edge_count != self.size {
            debug!(edge_count, rank_count = self.size, "scatter partition guard tripped");
            return Err(MstError::UnsupportedPartition {
                edge_count,
                rank_count: self.size,
            });
        }

        if self.size == 1 {
            return Ok(edges.map(<[Edge]>::to_vec).unwrap_or_default());
        }

        let chunk_size = edge_count.div_ceil(self.size).max(1);

        if self.is_root() {
            let edges = edges.expect("root must supply edges to scatter");
            let chunks: Vec<&[Edge]> = edges.chunks(chunk_size).collect();
            let local = chunks.first().map(|c| c.to_vec()).unwrap_or_default();
            for dst in 1..self.size {
                let payload = chunks.get(dst).map(|c| edges_to_wire(c)).unwrap_or_default();
                self.send_to(dst, payload);
            }
            Ok(local)
        } else {
            Ok(wire_to_edges(self.recv_from(0)))
        }
    }
}

/// Flattens edges into the `3 * len` `i64` wire format used by messages.
#[must_use]
pub fn edges_to_wire(edges: &[Edge]) -> Vec<i64> {
    let mut wire = Vec::with_capacity(edges.len() * 3);
    for edge in edges {
        wire.push(edge.from.index() as i64);
        wire.push(edge.to.index() as i64);
        wire.push(i64::from(edge.weight));
    }
    wire
}

/// Inverse of [`edges_to_wire`].
#[must_use]
pub fn wire_to_edges(wire: Vec<i64>) -> Vec<Edge> {
    wire.chunks_exact(3)
        .map(|chunk| {
            Edge::new(
                VertexId::from(chunk[0] as usize),
                VertexId::from(chunk[1] as usize),
                chunk[2] as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_delivers_the_root_value_to_every_rank() {
        let results = Cluster::launch(4, |cluster| {
            let value = cluster.broadcast(if cluster.is_root() { Some(vec![42]) } else { None });
            value[0]
        });
        assert_eq!(results, vec![42, 42, 42, 42]);
    }

    #[test]
    fn point_to_point_send_recv_round_trips() {
        let results = Cluster::launch(2, |cluster| {
            if cluster.is_root() {
                cluster.send_to(1, vec![7, 8, 9]);
                Vec::new()
            } else {
                cluster.recv_from(0)
            }
        });
        assert_eq!(results[1], vec![7, 8, 9]);
    }

    #[test]
    fn scatter_distributes_all_edges_exactly_once() {
        let edges: Vec<Edge> = (0..10)
            .map(|i| Edge::new(VertexId::from(0usize), VertexId::from(1usize), i))
            .collect();
        let edges_for_root = edges.clone();
        let results = Cluster::launch(3, move |cluster| {
            cluster
                .scatter_edges(if cluster.is_root() { Some(&edges_for_root) } else { None })
                .unwrap()
        });
        let total: usize = results.iter().map(Vec::len).sum();
        assert_eq!(total, edges.len());
    }

    #[test]
    fn scatter_rejects_too_few_edges_for_the_rank_count() {
        let edges = vec![Edge::new(VertexId::from(0usize), VertexId::from(1usize), 1)];
        let results = Cluster::launch(4, move |cluster| {
            cluster.scatter_edges(if cluster.is_root() { Some(&edges) } else { None })
        });
        assert!(matches!(results[0], Err(MstError::UnsupportedPartition { .. })));
    }
}
