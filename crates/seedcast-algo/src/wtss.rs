//! Weighted Target Set Selection (WTSS) — threshold elimination.
//!
//! Processes a shrinking working set `U` (initially all vertices) instead of
//! mutating the graph. For each `v ∈ U` it tracks the residual degree
//! `δ(v)` (neighbors still in `U`), the residual neighbor set `N(v)`, and
//! the residual threshold `k(v)`. One of three cases fires per step, checked
//! in order and re-evaluated from scratch after every removal:
//!
//! 1. **Free activation** — `k(v) = 0`: v will activate from outside `U`;
//!    its future activation lowers the thresholds of its remaining
//!    neighbors. Not added to the seed set.
//! 2. **Forced inclusion** — `δ(v) < k(v)`: v can never gather enough active
//!    neighbors inside `U`; it is added to the seed set if the budget still
//!    allows (the only way the seed set grows). Reaching the budget exactly
//!    (within a small tolerance, for fractional cost models) returns
//!    immediately.
//! 3. **Speculative removal** — every vertex could still be activated by its
//!    `U`-neighbors: drop the vertex maximizing
//!    `cost(v)·k(v) / (δ(v)·(δ(v)+1))`, presuming its influence will arrive
//!    from inside `U`; neighbor thresholds stay untouched.
//!
//! Vertex choices within a case are deterministic: lowest id among those
//! qualifying (Case 1/2) or among priority ties (Case 3).

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

use seedcast_graph::{UndirectedGraph, VertexId};

use crate::csg::{vertex_cost, SeedSelection};
use crate::error::SelectionError;

/// Tolerance for the exact-budget boundary check. Cost models with
/// fractional costs accumulate rounding noise, so "spent the whole budget"
/// is an interval, not a bit pattern.
const BUDGET_EPSILON: f64 = 1e-9;

struct WorkingState {
    /// Vertices not yet resolved; BTreeSet keeps scans in ascending id order.
    u: BTreeSet<VertexId>,
    /// δ(v): residual degree within `u`. Invariant: δ(v) == |n[v]|.
    delta: HashMap<VertexId, usize>,
    /// N(v): neighbors of v still in `u`.
    n: HashMap<VertexId, HashSet<VertexId>>,
    /// k(v): residual threshold; only ever decreases.
    k: HashMap<VertexId, usize>,
}

impl WorkingState {
    fn init(graph: &UndirectedGraph, thresholds: &HashMap<VertexId, usize>) -> Self {
        let vertices = graph.vertices();
        Self {
            u: vertices.iter().copied().collect(),
            delta: vertices.iter().map(|&v| (v, graph.degree(v))).collect(),
            n: vertices
                .iter()
                .map(|&v| (v, graph.neighbors(v).into_iter().collect()))
                .collect(),
            k: vertices
                .iter()
                .map(|&v| (v, thresholds.get(&v).copied().unwrap_or(0)))
                .collect(),
        }
    }

    /// Drop `v` from the working set, updating δ and N of its neighbors.
    fn remove(&mut self, v: VertexId) {
        let neighbors = self.n.get_mut(&v).map(std::mem::take).unwrap_or_default();
        for u in neighbors {
            if let Some(d) = self.delta.get_mut(&u) {
                *d -= 1;
            }
            if let Some(nu) = self.n.get_mut(&u) {
                nu.remove(&v);
            }
        }
        self.u.remove(&v);
    }

    /// Account for v's (eventual) activation: each remaining neighbor needs
    /// one fewer active neighbor, floored at zero.
    fn relax_neighbors(&mut self, v: VertexId) {
        if let Some(neighbors) = self.n.get(&v) {
            for u in neighbors.clone() {
                if let Some(ku) = self.k.get_mut(&u) {
                    *ku = ku.saturating_sub(1);
                }
            }
        }
    }
}

/// Build a seed set whose cost stays within `budget` such that every
/// vertex's activation threshold remains structurally satisfiable.
///
/// A threshold above a vertex's residual degree is not an error: it is the
/// trigger for forced inclusion (Case 2). Vertices absent from the threshold
/// map are treated as threshold 0 (free).
pub fn wtss(
    graph: &UndirectedGraph,
    thresholds: &HashMap<VertexId, usize>,
    costs: &HashMap<VertexId, f64>,
    budget: f64,
) -> Result<SeedSelection, SelectionError> {
    if budget < 0.0 {
        return Err(SelectionError::NegativeBudget(budget));
    }
    let started = Instant::now();

    let mut state = WorkingState::init(graph, thresholds);
    let mut seeds: HashSet<VertexId> = HashSet::new();
    let mut total_cost = 0.0;

    while !state.u.is_empty() {
        // Case 1: free activation.
        if let Some(&v) = state.u.iter().find(|&&v| state.k[&v] == 0) {
            state.relax_neighbors(v);
            state.remove(v);
            continue;
        }

        // Case 2: forced inclusion.
        if let Some(&v) = state.u.iter().find(|&&v| state.delta[&v] < state.k[&v]) {
            let c = vertex_cost(costs, v);
            let spent = total_cost + c;
            if (spent - budget).abs() < BUDGET_EPSILON {
                // Budget boundary reached: keep the vertex and stop here; the
                // remaining working set is left unresolved by policy.
                seeds.insert(v);
                total_cost = spent;
                return Ok(SeedSelection::new(seeds, total_cost, started));
            } else if spent < budget {
                seeds.insert(v);
                total_cost = spent;
            }
            // Over budget: dropped without joining the seed set, but its
            // neighbors' thresholds are still relaxed, as in Case 1.
            state.relax_neighbors(v);
            state.remove(v);
            continue;
        }

        // Case 3: speculative removal. Here k(v) >= 1 and δ(v) >= k(v), so
        // the denominator is never zero.
        let mut best: Option<(VertexId, f64)> = None;
        for &v in &state.u {
            let d = state.delta[&v] as f64;
            let priority = vertex_cost(costs, v) * state.k[&v] as f64 / (d * (d + 1.0));
            if best.map_or(true, |(_, p)| priority > p) {
                best = Some((v, priority));
            }
        }
        // u is non-empty here, so best is always set.
        if let Some((v, _)) = best {
            state.remove(v);
        }
    }

    Ok(SeedSelection::new(seeds, total_cost, started))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::majority_cascade;

    fn unit(graph: &UndirectedGraph, value: f64) -> HashMap<VertexId, f64> {
        graph.vertices().into_iter().map(|v| (v, value)).collect()
    }

    fn unit_thresholds(graph: &UndirectedGraph, value: usize) -> HashMap<VertexId, usize> {
        graph.vertices().into_iter().map(|v| (v, value)).collect()
    }

    /// 4-cycle 0-1-2-3-0.
    fn cycle4() -> UndirectedGraph {
        UndirectedGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    #[test]
    fn negative_budget_is_rejected() {
        let g = cycle4();
        let err = wtss(&g, &unit_thresholds(&g, 1), &unit(&g, 1.0), -0.5).unwrap_err();
        assert!(matches!(err, SelectionError::NegativeBudget(_)));
    }

    #[test]
    fn cycle_with_unit_thresholds_cascades_from_a_minimal_seed() {
        // Unit thresholds, unit costs, budget 2: the elimination order leaves
        // a single forced vertex, and majority cascade from it covers the
        // whole cycle.
        let g = cycle4();
        let sel = wtss(&g, &unit_thresholds(&g, 1), &unit(&g, 1.0), 2.0).unwrap();

        assert!(sel.seeds.len() <= 2);
        assert!(sel.total_cost <= 2.0);

        let outcome = majority_cascade(&g, &sel.seeds);
        assert_eq!(outcome.influenced, vec![0, 1, 2, 3]);
    }

    #[test]
    fn threshold_above_degree_forces_inclusion() {
        // Vertex 0 needs 3 active neighbors but has degree 1: impossible via
        // neighbors alone, so it must be forced into the seed set.
        let g = UndirectedGraph::from_edges([(0, 1)]);
        let mut t = unit_thresholds(&g, 1);
        t.insert(0, 3);

        let sel = wtss(&g, &t, &unit(&g, 1.0), 10.0).unwrap();
        assert!(sel.seeds.contains(&0));
    }

    #[test]
    fn zero_threshold_vertices_are_never_seeded() {
        let g = cycle4();
        let sel = wtss(&g, &unit_thresholds(&g, 0), &unit(&g, 1.0), 10.0).unwrap();
        assert!(sel.seeds.is_empty());
        assert_eq!(sel.total_cost, 0.0);
    }

    #[test]
    fn missing_threshold_entries_default_to_free() {
        let g = cycle4();
        let sel = wtss(&g, &HashMap::new(), &unit(&g, 1.0), 10.0).unwrap();
        assert!(sel.seeds.is_empty());
    }

    #[test]
    fn budget_is_never_exceeded() {
        // Star with high thresholds: every leaf wants 2 active neighbors but
        // has degree 1, so all leaves are candidates for forcing.
        let g = UndirectedGraph::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]);
        let t: HashMap<VertexId, usize> =
            g.vertices().into_iter().map(|v| (v, 2)).collect();
        for budget in [0.0, 1.0, 2.5, 3.0] {
            let sel = wtss(&g, &t, &unit(&g, 1.0), budget).unwrap();
            assert!(
                sel.total_cost <= budget,
                "overspent: {} > {budget}",
                sel.total_cost
            );
        }
    }

    #[test]
    fn exact_budget_equality_returns_early() {
        // Two disconnected vertices both demanding more than their degree:
        // both would normally be forced, but the budget admits exactly one.
        let g = UndirectedGraph::new();
        g.add_vertex(0);
        g.add_vertex(1);
        let t: HashMap<VertexId, usize> = [(0, 1), (1, 1)].into();

        let sel = wtss(&g, &t, &unit(&g, 1.0), 1.0).unwrap();
        assert_eq!(sel.seeds, vec![0]);
        assert_eq!(sel.total_cost, 1.0);
    }

    #[test]
    fn budget_boundary_tolerates_fractional_cost_rounding() {
        // 0.1 + 0.2 lands a hair above 0.3 in binary; the boundary check must
        // still treat it as spending the whole budget, not as an overshoot.
        let g = UndirectedGraph::new();
        g.add_vertex(0);
        g.add_vertex(1);
        let t: HashMap<VertexId, usize> = [(0, 1), (1, 1)].into();
        let costs: HashMap<VertexId, f64> = [(0, 0.1), (1, 0.2)].into();

        let sel = wtss(&g, &t, &costs, 0.3).unwrap();
        assert_eq!(sel.seeds, vec![0, 1]);
        assert!((sel.total_cost - 0.3).abs() < 1e-9);
    }

    #[test]
    fn forced_vertex_over_budget_is_dropped_but_still_relaxes_neighbors() {
        // Path 0-1: threshold(0) = 2 > degree, cost(0) huge. 0 cannot be
        // afforded, but dropping it still lowers 1's threshold, so 1
        // resolves freely.
        let g = UndirectedGraph::from_edges([(0, 1)]);
        let t: HashMap<VertexId, usize> = [(0, 2), (1, 1)].into();
        let costs: HashMap<VertexId, f64> = [(0, 100.0), (1, 1.0)].into();

        let sel = wtss(&g, &t, &costs, 5.0).unwrap();
        assert!(sel.seeds.is_empty());
        assert_eq!(sel.total_cost, 0.0);
    }
}
