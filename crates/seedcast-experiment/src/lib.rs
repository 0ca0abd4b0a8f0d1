//! # seedcast-experiment
//!
//! Budget-sweep experiments over the seedcast selectors:
//!
//! - **`synth`**: seeded random-graph generation (the drivers build graphs in
//!   memory rather than parsing edge-list files)
//! - **`telemetry`**: append-only CSV records for selector runs and cascade
//!   evaluations — the result sink the core reports to
//!
//! The binary sweeps a budget range with one selector, extends each CSG
//! selection from the previous budget's result, and scores every produced
//! seed set with the majority cascade.

pub mod synth;
pub mod telemetry;
