//! Synchronous majority-threshold diffusion.
//!
//! Starting from a seed set, each round activates every inactive vertex
//! whose active-neighbor count reaches half its degree (rounded up).
//! Isolated vertices never activate. The influence set grows monotonically,
//! so the process reaches a fixed point within |V| rounds.

use std::collections::HashSet;
use std::time::Instant;

use seedcast_graph::{ceil_div, UndirectedGraph, VertexId};

/// Influence closure of a seed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// All influenced vertices (seeds included), ascending.
    pub influenced: Vec<VertexId>,
    /// Number of rounds that activated at least one new vertex.
    pub rounds: usize,
    pub duration_ms: u64,
}

/// Run the majority cascade from `seeds` to its fixed point.
///
/// Deterministic and infallible: two runs on identical inputs produce
/// identical outcomes.
pub fn majority_cascade(graph: &UndirectedGraph, seeds: &[VertexId]) -> CascadeOutcome {
    let started = Instant::now();

    let mut influenced: HashSet<VertexId> = seeds.iter().copied().collect();
    let mut rounds = 0;

    loop {
        let mut newly: Vec<VertexId> = Vec::new();
        for v in graph.vertices() {
            if influenced.contains(&v) {
                continue;
            }
            let deg = graph.degree(v);
            if deg == 0 {
                continue;
            }
            let active = graph
                .neighbors(v)
                .into_iter()
                .filter(|u| influenced.contains(u))
                .count();
            if active >= ceil_div(deg, 2) {
                newly.push(v);
            }
        }

        if newly.is_empty() {
            break;
        }
        rounds += 1;
        influenced.extend(newly);
    }

    let mut influenced: Vec<VertexId> = influenced.into_iter().collect();
    influenced.sort_unstable();

    CascadeOutcome {
        influenced,
        rounds,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
