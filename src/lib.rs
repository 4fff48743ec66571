//! A distributed-memory minimum spanning tree engine.
//!
//! Four interchangeable MST kernels — Kruskal, Prim over a binary min-heap,
//! Prim over a Fibonacci min-heap, and a parallel Borůvka — operate over a
//! weighted undirected graph stored as a flat edge list. Kruskal and Borůvka
//! are distributed across a simulated bulk-synchronous message-passing
//! cluster ([`core::cluster`]); the two Prim variants run sequentially on
//! the root rank only.
pub mod core;
