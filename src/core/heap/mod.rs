//! Priority queues used by the sequential Prim kernels.

pub mod binary;
pub mod fibonacci;

pub use binary::BinaryMinHeap;
pub use fibonacci::FibonacciMinHeap;
