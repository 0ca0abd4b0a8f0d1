//! Seed-set selection and diffusion algorithms for the seedcast workspace.
//!
//! Two competing selectors build a seed set under a per-vertex cost budget,
//! and a simulator scores the result:
//!
//! - **Scoring**: three monotone submodular coverage functions over
//!   (seed set, graph)
//! - **CSG**: cost-constrained greedy maximization of a coverage function,
//!   in a naive full-rescore form and a lazy marginal-gain-cache form
//! - **WTSS**: threshold-satisfaction elimination — vertices are forced into
//!   the seed set only when their activation can no longer come from
//!   neighbors
//! - **Cascade**: synchronous majority-threshold diffusion computing the
//!   influence closure of a seed set
//!
//! All algorithms are single-threaded and deterministic; ties are broken by
//! lowest vertex id. Independent runs may execute in parallel over the same
//! immutable graph.

pub mod cascade;
pub mod csg;
pub mod error;
pub mod scoring;
pub mod wtss;

pub use cascade::{majority_cascade, CascadeOutcome};
pub use csg::{cost_seeds_greedy, cost_seeds_greedy_lazy, SeedSelection, COST_EPSILON};
pub use error::SelectionError;
pub use scoring::Scorer;
pub use wtss::wtss;
