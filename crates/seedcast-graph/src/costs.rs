//! Per-vertex cost models and the majority threshold map.
//!
//! Three cost assignments are supported, matching the experiment families the
//! selectors are benchmarked under:
//!
//! 1. **Half-degree**: cost(v) = ⌈degree(v)/2⌉ — expensive hubs.
//! 2. **Seeded random**: uniform integer in the half-degree cost range.
//! 3. **Centrality-derived**: log10-scaled betweenness (or any other
//!    externally supplied centrality score), rescaled into the half-degree
//!    cost range.
//!
//! The threshold map for the elimination selector reuses the half-degree
//! rule: a vertex activates once half of its neighbors (rounded up) are
//! active.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adjacency::{UndirectedGraph, VertexId};
use crate::ceil_div;

/// Additive floor applied before taking log10 of a centrality score, so that
/// zero-centrality vertices stay finite.
const CENTRALITY_EPSILON: f64 = 1e-6;

/// cost(v) = ⌈degree(v)/2⌉; isolated vertices cost 0.
pub fn half_degree_costs(graph: &UndirectedGraph) -> HashMap<VertexId, f64> {
    graph
        .vertices()
        .into_iter()
        .map(|v| (v, ceil_div(graph.degree(v), 2) as f64))
        .collect()
}

/// Uniform random integer cost in `[min, max]` of the half-degree costs.
///
/// Deterministic for a fixed `seed`: vertices are visited in ascending id
/// order and the generator is a seeded `StdRng`.
pub fn random_costs(graph: &UndirectedGraph, seed: u64) -> HashMap<VertexId, f64> {
    let half = half_degree_costs(graph);
    if half.is_empty() {
        return HashMap::new();
    }

    let min = half.values().copied().fold(f64::INFINITY, f64::min) as u64;
    let max = half.values().copied().fold(f64::NEG_INFINITY, f64::max) as u64;

    let mut rng = StdRng::seed_from_u64(seed);
    graph
        .vertices()
        .into_iter()
        .map(|v| (v, rng.gen_range(min..=max) as f64))
        .collect()
}

/// Log-scaled centrality cost.
///
/// The centrality map comes from an external oracle (e.g. betweenness).
/// Scores are mapped through `log10(c + ε)`, shifted so the minimum is 0,
/// then scaled so the maximum equals the maximum half-degree cost. Vertices
/// missing from the oracle map are treated as centrality 0.
pub fn centrality_costs(
    graph: &UndirectedGraph,
    centrality: &HashMap<VertexId, f64>,
) -> HashMap<VertexId, f64> {
    let vertices = graph.vertices();
    if vertices.is_empty() {
        return HashMap::new();
    }

    let log_scores: Vec<f64> = vertices
        .iter()
        .map(|v| {
            let c = centrality.get(v).copied().unwrap_or(0.0);
            (c + CENTRALITY_EPSILON).log10()
        })
        .collect();

    let min_log = log_scores.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted: Vec<f64> = log_scores.iter().map(|s| s - min_log).collect();
    let max_shifted = shifted.iter().copied().fold(0.0_f64, f64::max);

    let max_half = half_degree_costs(graph)
        .values()
        .copied()
        .fold(0.0_f64, f64::max);
    let scale = if max_shifted > 0.0 {
        max_half / max_shifted
    } else {
        1.0
    };

    vertices
        .into_iter()
        .zip(shifted)
        .map(|(v, s)| (v, s * scale))
        .collect()
}

/// t(v) = ⌈degree(v)/2⌉ — the majority activation threshold.
pub fn majority_thresholds(graph: &UndirectedGraph) -> HashMap<VertexId, usize> {
    graph
        .vertices()
        .into_iter()
        .map(|v| (v, ceil_div(graph.degree(v), 2)))
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
