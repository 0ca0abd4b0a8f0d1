//! Submodular coverage scoring of candidate seed sets.
//!
//! Each variant assigns a vertex `v` a contribution that depends only on
//! `c = |neighbors(v) ∩ S|`, `deg = degree(v)` and `h = ⌈deg/2⌉`, summed over
//! all vertices. All three are monotone with diminishing marginal returns in
//! `S`, and the per-vertex form gives an O(1) delta rule (`marginal_term`)
//! when one more neighbor of `v` enters the seed set — the basis of the lazy
//! greedy selector.

use std::collections::HashSet;

use seedcast_graph::{ceil_div, UndirectedGraph, VertexId};

/// The three coverage functions a greedy selection can maximize.
///
/// The set of variants is closed: encoding them as an enum makes an
/// unsupported scorer unrepresentable rather than a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scorer {
    /// Each vertex contributes `min(c, h)` — coverage capped at half-degree.
    CappedCoverage,
    /// Each covering neighbor `i = 1..c` contributes `max(h − i + 1, 0)`:
    /// triangular-number returns vanishing once `i` exceeds `h`.
    TriangularBonus,
    /// `TriangularBonus` with each term divided by `deg − i + 1`, giving a
    /// fractional score in a bounded range.
    NormalizedTriangularBonus,
}

impl Scorer {
    /// Stable identifier used in experiment logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CappedCoverage => "capped_coverage",
            Self::TriangularBonus => "triangular_bonus",
            Self::NormalizedTriangularBonus => "normalized_triangular_bonus",
        }
    }

    /// Score of the seed set `seeds` against `graph`. `score(∅) = 0`.
    pub fn score(&self, seeds: &HashSet<VertexId>, graph: &UndirectedGraph) -> f64 {
        self.score_with(seeds, None, graph)
    }

    /// Score of `seeds ∪ {extra}` without materializing the union.
    ///
    /// The naive greedy selector uses this to evaluate candidates
    /// side-effect-free instead of mutating and restoring the seed set.
    pub(crate) fn score_with(
        &self,
        seeds: &HashSet<VertexId>,
        extra: Option<VertexId>,
        graph: &UndirectedGraph,
    ) -> f64 {
        if seeds.is_empty() && extra.is_none() {
            return 0.0;
        }

        let mut score = 0.0;
        for v in graph.vertices() {
            let deg = graph.degree(v);
            if deg == 0 {
                continue;
            }
            let covered = graph
                .neighbors(v)
                .into_iter()
                .filter(|u| seeds.contains(u) || extra == Some(*u))
                .count();
            score += self.vertex_term(covered, deg);
        }
        score
    }

    /// Contribution of one vertex with `covered` of its `deg` neighbors in S.
    fn vertex_term(&self, covered: usize, deg: usize) -> f64 {
        let half = ceil_div(deg, 2);
        match self {
            Self::CappedCoverage => covered.min(half) as f64,
            Self::TriangularBonus => {
                // Closed form of Σ_{i=1..c} max(h − i + 1, 0):
                // only the first min(c, h) terms are non-zero.
                let c = covered.min(half);
                (c * half - c * c.saturating_sub(1) / 2) as f64
            }
            Self::NormalizedTriangularBonus => {
                let c = covered.min(half);
                (1..=c)
                    .map(|i| (half - i + 1) as f64 / (deg - i + 1) as f64)
                    .sum()
            }
        }
    }

    /// Change in vertex `v`'s contribution when its covered-neighbor count
    /// goes from `covered` to `covered + 1`.
    ///
    /// Equals `vertex_term(covered + 1, deg) − vertex_term(covered, deg)`;
    /// the lazy selector sums this over the neighbors of a candidate to get
    /// its marginal gain in O(degree) instead of O(|V|).
    pub fn marginal_term(&self, covered: usize, deg: usize) -> f64 {
        let half = ceil_div(deg, 2);
        match self {
            Self::CappedCoverage => {
                if covered < half {
                    1.0
                } else {
                    0.0
                }
            }
            Self::TriangularBonus => (half.saturating_sub(covered)) as f64,
            Self::NormalizedTriangularBonus => {
                if covered < half && deg > covered {
                    (half - covered) as f64 / (deg - covered) as f64
                } else {
                    0.0
                }
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
