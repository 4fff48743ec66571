/*!
# Fibonacci Min-Heap

A min-heap over `(vertex, via, weight)` triples supporting amortised `O(1)`
push and decrease-key and amortised `O(log n)` extract-min.

Nodes live in a [`slab::Slab`] arena and are addressed by stable `usize`
handles rather than raw pointers, per the arena strategy: sibling order
within a tree is tracked as a plain `Vec<usize>` of child handles on each
node instead of a circular doubly-linked list, which keeps every operation
(push, pop, decrease-key, consolidate, cut, cascading cut) and its
complexity bound intact without introducing unsafe aliasing.
*/

use std::collections::HashMap;

use slab::Slab;

use crate::core::types::VertexId;

const UNSET: usize = usize::MAX;

struct Node {
    vertex: VertexId,
    via: VertexId,
    weight: i32,
    marked: bool,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A Fibonacci min-heap over `(vertex, via, weight)` triples.
pub struct FibonacciMinHeap {
    nodes: Slab<Node>,
    roots: Vec<usize>,
    minimum: Option<usize>,
    positions: Vec<usize>,
    size: usize,
}

impl FibonacciMinHeap {
    /// Creates an empty heap sized for `vertex_count` distinct vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        FibonacciMinHeap {
            nodes: Slab::new(),
            roots: Vec::new(),
            minimum: None,
            positions: vec![UNSET; vertex_count],
            size: 0,
        }
    }

    /// Returns `true` if the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `v` currently has an entry in the heap.
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        self.positions[v.index()] != UNSET
    }

    /// Pushes `(v, via, w)` as a new singleton root.
    pub fn push(&mut self, v: VertexId, via: VertexId, w: i32) {
        let handle = self.nodes.insert(Node {
            vertex: v,
            via,
            weight: w,
            marked: false,
            parent: None,
            children: Vec::new(),
        });
        self.positions[v.index()] = handle;
        self.roots.push(handle);
        match self.minimum {
            Some(m) if self.weight_of(m) <= w => {}
            _ => self.minimum = Some(handle),
        }
        self.size += 1;
    }

    /// Removes and returns the minimum-weight `(vertex, via, weight)` triple.
    ///
    /// A no-op that returns `None` on an empty heap.
    pub fn pop(&mut self) -> Option<(VertexId, VertexId, i32)> {
        let min_handle = self.minimum?;

        let children = std::mem::take(&mut self.nodes[min_handle].children);
        for child in &children {
            self.nodes[*child].parent = None;
            self.roots.push(*child);
        }
        if let Some(pos) = self.roots.iter().position(|&h| h == min_handle) {
            self.roots.swap_remove(pos);
        }

        let node = self.nodes.remove(min_handle);
        self.positions[node.vertex.index()] = UNSET;
        self.size -= 1;

        if self.size == 0 {
            self.minimum = None;
            self.roots.clear();
        } else {
            self.consolidate();
        }

        Some((node.vertex, node.via, node.weight))
    }

    /// If `v` is present and its stored weight strictly exceeds `w`, updates
    /// `(via, weight)` and restores the heap property, cutting the node out
    /// of its parent's child list if needed. Otherwise a no-op.
    pub fn decrease(&mut self, v: VertexId, via: VertexId, w: i32) {
        let handle = self.positions[v.index()];
        if handle == UNSET || self.weight_of(handle) <= w {
            return;
        }
        self.nodes[handle].via = via;
        self.nodes[handle].weight = w;

        match self.nodes[handle].parent {
            None => {
                if self.weight_of(self.minimum.expect("non-empty heap has a minimum")) > w {
                    self.minimum = Some(handle);
                }
            }
            Some(parent) if self.weight_of(parent) > w => self.cut(handle),
            Some(_) => {}
        }
    }

    fn weight_of(&self, handle: usize) -> i32 {
        self.nodes[handle].weight
    }

    fn cut(&mut self, handle: usize) {
        let parent_handle = self.nodes[handle].parent;
        if let Some(parent) = parent_handle
            && let Some(pos) = self.nodes[parent].children.iter().position(|&h| h == handle)
        {
            self.nodes[parent].children.swap_remove(pos);
        }

        self.nodes[handle].parent = None;
        self.nodes[handle].marked = false;
        self.roots.push(handle);

        if self.weight_of(handle) < self.weight_of(self.minimum.expect("non-empty heap has a minimum")) {
            self.minimum = Some(handle);
        }

        if let Some(parent) = parent_handle
            && self.nodes[parent].parent.is_some()
        {
            if self.nodes[parent].marked {
                self.cut(parent);
            } else {
                self.nodes[parent].marked = true;
            }
        }
    }

    fn link(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) = if self.weight_of(a) <= self.weight_of(b) {
            (a, b)
        } else {
            (b, a)
        };
        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;
        self.nodes[parent].children.push(child);
        parent
    }

    fn consolidate(&mut self) {
        let mut by_degree: HashMap<usize, usize> = HashMap::new();
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            let mut current = root;
            loop {
                let degree = self.nodes[current].children.len();
                match by_degree.remove(&degree) {
                    None => {
                        by_degree.insert(degree, current);
                        break;
                    }
                    Some(other) => current = self.link(current, other),
                }
            }
        }
        self.minimum = by_degree
            .values()
            .copied()
            .min_by_key(|&h| self.weight_of(h));
        self.roots = by_degree.into_values().collect();
    }

    /// Returns the distinct child counts ("degrees") of every root, used by
    /// tests to check the post-consolidate invariant.
    #[cfg(test)]
    fn root_degrees(&self) -> Vec<usize> {
        self.roots
            .iter()
            .map(|&h| self.nodes[h].children.len())
            .collect()
    }
}
