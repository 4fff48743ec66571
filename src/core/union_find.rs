/*!
# Disjoint-Set (Union–Find)

A union–find structure over the vertex set, used by Kruskal and Borůvka for
cycle detection and component merging. Path compression and union-by-rank
keep both operations near-constant amortised time.
*/

use crate::core::types::VertexId;

/// A disjoint-set (union–find) structure over `[0, n)`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Creates a new disjoint-set with `n` singleton components.
    #[must_use]
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the canonical root of `v`'s component, compressing the path
    /// from `v` to the root as it goes.
    pub fn find_set(&mut self, v: VertexId) -> VertexId {
        let root = self.find_root(v.index());
        VertexId::from(root)
    }

    fn find_root(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = v;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Unifies the components containing `a` and `b` using union-by-rank.
    ///
    /// `a` and `b` need not be roots. A no-op if they are already unified.
    pub fn union_set(&mut self, a: VertexId, b: VertexId) {
        let ra = self.find_root(a.index());
        let rb = self.find_root(b.index());
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
