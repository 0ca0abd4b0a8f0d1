//! Graph layer for the seedcast workspace.
//!
//! Provides the read-side abstraction the selectors and the cascade simulator
//! consume:
//!
//! - **`UndirectedGraph`**: in-memory adjacency index over integer vertex ids,
//!   concurrent-safe during construction, read-only during a selection run
//! - **`costs`**: per-vertex cost models (half-degree, seeded random,
//!   log-scaled centrality) and the majority threshold map

pub mod adjacency;
pub mod costs;

pub use adjacency::{UndirectedGraph, VertexId};
pub use costs::{
    centrality_costs, half_degree_costs, majority_thresholds, random_costs,
};

/// Ceiling integer division: `ceil_div(5, 2) == 3`.
#[inline]
pub fn ceil_div(numerator: usize, denominator: usize) -> usize {
    debug_assert!(denominator > 0, "ceil_div denominator must be positive");
    numerator.div_ceil(denominator)
}
