//! Cost-constrained greedy seed selection (CSG).
//!
//! Repeatedly adds the candidate with the best marginal-score-per-cost ratio
//! until the budget can no longer admit one. Two forms:
//!
//! - [`cost_seeds_greedy`]: naive — rescores every remaining candidate
//!   against the full graph each round.
//! - [`cost_seeds_greedy_lazy`]: maintains per-vertex covered-neighbor
//!   counts and a max-heap of cached gain/cost ratios with lazy invalidation;
//!   after a pick, only vertices within distance 2 of it are re-rated. Under
//!   the scorers' per-vertex delta rule the outcome is identical to the
//!   naive form.
//!
//! Both forms accept a resume state (a prior selection and its cost) so a
//! budget sweep can extend the previous result instead of restarting, and
//! both break ratio ties by lowest vertex id.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use seedcast_graph::{UndirectedGraph, VertexId};

use crate::error::SelectionError;
use crate::scoring::Scorer;

/// Substitute for zero or missing per-vertex costs, keeping gain/cost ratios
/// finite.
pub const COST_EPSILON: f64 = 1e-6;

/// Result of one selector run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSelection {
    /// Selected vertex ids in ascending order.
    pub seeds: Vec<VertexId>,
    /// Sum of the selected vertices' costs (epsilon-substituted where the
    /// cost map had no entry).
    pub total_cost: f64,
    pub duration_ms: u64,
}

impl SeedSelection {
    pub(crate) fn new(seeds: HashSet<VertexId>, total_cost: f64, started: Instant) -> Self {
        let mut seeds: Vec<VertexId> = seeds.into_iter().collect();
        seeds.sort_unstable();
        Self {
            seeds,
            total_cost,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Resume state for extending this selection under a larger budget.
    pub fn resume_state(&self) -> (&[VertexId], f64) {
        (&self.seeds, self.total_cost)
    }
}

/// Cost of `v` with the epsilon substitution applied.
pub(crate) fn vertex_cost(costs: &HashMap<VertexId, f64>, v: VertexId) -> f64 {
    let c = costs.get(&v).copied().unwrap_or(0.0);
    if c > 0.0 {
        c
    } else {
        COST_EPSILON
    }
}

fn check_budget(budget: f64) -> Result<(), SelectionError> {
    if budget < 0.0 {
        return Err(SelectionError::NegativeBudget(budget));
    }
    Ok(())
}

fn initial_state(resume: Option<(&[VertexId], f64)>) -> (HashSet<VertexId>, f64) {
    match resume {
        Some((seeds, cost)) => (seeds.iter().copied().collect(), cost),
        None => (HashSet::new(), 0.0),
    }
}

// ─────────────────────────────────────────────
// Naive form
// ─────────────────────────────────────────────

/// Greedy selection with full rescoring each round.
///
/// Guarantees `total_cost <= budget` on return. Stops (not an error) when no
/// remaining candidate fits the budget.
pub fn cost_seeds_greedy(
    graph: &UndirectedGraph,
    budget: f64,
    costs: &HashMap<VertexId, f64>,
    scorer: Scorer,
    resume: Option<(&[VertexId], f64)>,
) -> Result<SeedSelection, SelectionError> {
    check_budget(budget)?;
    let started = Instant::now();

    let (mut seeds, mut total_cost) = initial_state(resume);
    let mut remaining: Vec<VertexId> = graph
        .vertices()
        .into_iter()
        .filter(|v| !seeds.contains(v))
        .collect();

    while total_cost < budget && !remaining.is_empty() {
        let current_value = scorer.score(&seeds, graph);

        // Ascending id order + strict `>` keeps the lowest id among ties.
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in remaining.iter().enumerate() {
            let gain = scorer.score_with(&seeds, Some(v), graph) - current_value;
            let ratio = gain / vertex_cost(costs, v);
            if best.map_or(true, |(_, r)| ratio > r) {
                best = Some((idx, ratio));
            }
        }

        let Some((idx, _)) = best else { break };
        let v = remaining[idx];
        if total_cost + vertex_cost(costs, v) > budget {
            break;
        }

        total_cost += vertex_cost(costs, v);
        seeds.insert(v);
        // Order-preserving removal: the tie-break depends on the ascending
        // scan staying ascending across rounds.
        remaining.remove(idx);
    }

    Ok(SeedSelection::new(seeds, total_cost, started))
}

// ─────────────────────────────────────────────
// Lazy-greedy form
// ─────────────────────────────────────────────

/// Heap entry ordered by ratio descending, then vertex id ascending, so the
/// pop order matches the naive selector's tie-break.
#[derive(Debug)]
struct RatioEntry {
    ratio: f64,
    vertex: VertexId,
}

impl PartialEq for RatioEntry {
    fn eq(&self, other: &Self) -> bool {
        self.ratio == other.ratio && self.vertex == other.vertex
    }
}
impl Eq for RatioEntry {}

impl PartialOrd for RatioEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for RatioEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio
            .partial_cmp(&other.ratio)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Greedy selection with incrementally maintained marginal gains.
///
/// Per-vertex covered-neighbor counts are updated only around the vertex
/// just added; cached ratios are verified on pop (lazy invalidation) and
/// refreshed only for vertices within distance 2 of the pick.
pub fn cost_seeds_greedy_lazy(
    graph: &UndirectedGraph,
    budget: f64,
    costs: &HashMap<VertexId, f64>,
    scorer: Scorer,
    resume: Option<(&[VertexId], f64)>,
) -> Result<SeedSelection, SelectionError> {
    check_budget(budget)?;
    let started = Instant::now();

    let (mut seeds, mut total_cost) = initial_state(resume);

    // covered[w] = |neighbors(w) ∩ S|, maintained incrementally.
    let mut covered: HashMap<VertexId, usize> =
        graph.vertices().into_iter().map(|v| (v, 0)).collect();
    for &u in &seeds {
        for w in graph.neighbors(u) {
            *covered.entry(w).or_insert(0) += 1;
        }
    }

    let gain_of = |v: VertexId, covered: &HashMap<VertexId, usize>| -> f64 {
        graph
            .neighbors(v)
            .into_iter()
            .map(|w| scorer.marginal_term(covered[&w], graph.degree(w)))
            .sum()
    };

    let mut remaining: HashSet<VertexId> = graph
        .vertices()
        .into_iter()
        .filter(|v| !seeds.contains(v))
        .collect();

    // Cached ratio per candidate; a popped entry is accepted only if it still
    // matches the cache (stale entries are skipped).
    let mut cached: HashMap<VertexId, f64> = HashMap::new();
    let mut heap: BinaryHeap<RatioEntry> = BinaryHeap::new();
    for v in graph.vertices() {
        if !remaining.contains(&v) {
            continue;
        }
        let ratio = gain_of(v, &covered) / vertex_cost(costs, v);
        cached.insert(v, ratio);
        heap.push(RatioEntry { ratio, vertex: v });
    }

    while total_cost < budget {
        // Pop until a current entry surfaces.
        let v = loop {
            let Some(entry) = heap.pop() else {
                return Ok(SeedSelection::new(seeds, total_cost, started));
            };
            if remaining.contains(&entry.vertex)
                && cached.get(&entry.vertex) == Some(&entry.ratio)
            {
                break entry.vertex;
            }
        };

        if total_cost + vertex_cost(costs, v) > budget {
            break;
        }

        total_cost += vertex_cost(costs, v);
        seeds.insert(v);
        remaining.remove(&v);
        cached.remove(&v);

        // Only neighbors of v gained a covered neighbor...
        for w in graph.neighbors(v) {
            *covered.entry(w).or_insert(0) += 1;
        }

        // ...so only candidates adjacent to those (distance <= 2 from v) can
        // have changed gains.
        let mut affected: HashSet<VertexId> = HashSet::new();
        for w in graph.neighbors(v) {
            for u in graph.neighbors(w) {
                if remaining.contains(&u) {
                    affected.insert(u);
                }
            }
        }

        for u in affected {
            let ratio = gain_of(u, &covered) / vertex_cost(costs, u);
            if cached.get(&u) != Some(&ratio) {
                cached.insert(u, ratio);
                heap.push(RatioEntry { ratio, vertex: u });
            }
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

    const ALL: [Scorer; 3] = [
        Scorer::CappedCoverage,
        Scorer::TriangularBonus,
        Scorer::NormalizedTriangularBonus,
    ];

    fn unit_costs(graph: &UndirectedGraph) -> HashMap<VertexId, f64> {
        graph.vertices().into_iter().map(|v| (v, 1.0)).collect()
    }

    /// Star: center 0 with 4 leaves.
    fn star() -> UndirectedGraph {
        UndirectedGraph::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)])
    }

    /// Two triangles joined by a bridge: 0-1-2-0, 3-4-5-3, bridge 2-3.
    fn bridged_triangles() -> UndirectedGraph {
        UndirectedGraph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)])
    }

    #[test]
    fn negative_budget_is_rejected() {
        let g = star();
        let costs = unit_costs(&g);
        for run in [cost_seeds_greedy, cost_seeds_greedy_lazy] {
            let err = run(&g, -1.0, &costs, Scorer::CappedCoverage, None).unwrap_err();
            assert!(matches!(err, SelectionError::NegativeBudget(_)));
        }
    }

    #[test]
    fn zero_budget_selects_nothing() {
        let g = star();
        let costs = unit_costs(&g);
        let sel = cost_seeds_greedy(&g, 0.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert!(sel.seeds.is_empty());
        assert_eq!(sel.total_cost, 0.0);
    }

    #[test]
    fn star_center_beats_any_leaf() {
        // Budget equal to the center's half-degree cost: the center alone
        // scores 4 under capped coverage, any single leaf scores 1.
        let g = star();
        let costs = seedcast_graph::half_degree_costs(&g);
        let sel = cost_seeds_greedy(&g, 2.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert_eq!(sel.seeds, vec![0]);

        let scorer = Scorer::CappedCoverage;
        let center_score = scorer.score(&[0].into_iter().collect(), &g);
        for leaf in 1..=4 {
            let leaf_score = scorer.score(&[leaf].into_iter().collect(), &g);
            assert!(center_score > leaf_score);
        }
    }

    #[test]
    fn budget_is_respected() {
        let g = bridged_triangles();
        let costs = seedcast_graph::half_degree_costs(&g);
        for scorer in ALL {
            for budget in [0.0, 1.0, 2.0, 3.5, 10.0] {
                let sel = cost_seeds_greedy(&g, budget, &costs, scorer, None).unwrap();
                assert!(
                    sel.total_cost <= budget,
                    "{scorer:?} overspent: {} > {budget}",
                    sel.total_cost
                );
            }
        }
    }

    #[test]
    fn increasing_budget_never_decreases_the_score() {
        let g = bridged_triangles();
        let costs = seedcast_graph::half_degree_costs(&g);
        for scorer in ALL {
            let mut prev = -1.0;
            for budget in [1.0, 2.0, 4.0, 8.0] {
                let sel = cost_seeds_greedy(&g, budget, &costs, scorer, None).unwrap();
                let score = scorer.score(&sel.seeds.iter().copied().collect(), &g);
                assert!(
                    score >= prev,
                    "{scorer:?} score dropped from {prev} to {score} at budget {budget}"
                );
                prev = score;
            }
        }
    }

    #[test]
    fn lazy_matches_naive() {
        let g = bridged_triangles();
        let half = seedcast_graph::half_degree_costs(&g);
        let unit = unit_costs(&g);
        for scorer in ALL {
            for costs in [&half, &unit] {
                for budget in [1.0, 2.0, 3.0, 6.0] {
                    let naive = cost_seeds_greedy(&g, budget, costs, scorer, None).unwrap();
                    let lazy = cost_seeds_greedy_lazy(&g, budget, costs, scorer, None).unwrap();
                    assert_eq!(
                        naive.seeds, lazy.seeds,
                        "{scorer:?} diverged at budget {budget}"
                    );
                    assert!((naive.total_cost - lazy.total_cost).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn resumed_sweep_matches_fresh_run() {
        // Greedy pick order does not depend on the budget, so extending a
        // smaller selection must reproduce the larger one.
        let g = bridged_triangles();
        let costs = unit_costs(&g);
        for scorer in ALL {
            let small = cost_seeds_greedy(&g, 2.0, &costs, scorer, None).unwrap();
            let resumed =
                cost_seeds_greedy(&g, 4.0, &costs, scorer, Some(small.resume_state())).unwrap();
            let fresh = cost_seeds_greedy(&g, 4.0, &costs, scorer, None).unwrap();
            assert_eq!(resumed.seeds, fresh.seeds, "{scorer:?} resume diverged");
        }
    }

    #[test]
    fn missing_costs_fall_back_to_epsilon() {
        let g = star();
        let costs = HashMap::new(); // every vertex missing
        let sel = cost_seeds_greedy(&g, 1.0, &costs, Scorer::CappedCoverage, None).unwrap();
        // Epsilon costs admit every vertex well within budget.
        assert_eq!(sel.seeds.len(), 5);
        assert!(sel.total_cost <= 1.0);
    }

    #[test]
    fn tie_break_survives_candidate_removal() {
        // Star center 0 plus a disjoint edge 4-5. After the center is picked
        // every remaining candidate has gain 1 at unit cost, so the second
        // pick must be the lowest id (1) regardless of how the first removal
        // reshuffled the candidate list.
        let g = UndirectedGraph::from_edges([(0, 1), (0, 2), (0, 3), (4, 5)]);
        let costs = unit_costs(&g);
        let naive = cost_seeds_greedy(&g, 2.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert_eq!(naive.seeds, vec![0, 1]);
        let lazy = cost_seeds_greedy_lazy(&g, 2.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert_eq!(lazy.seeds, naive.seeds);
    }

    #[test]
    fn ties_break_towards_the_lowest_id() {
        // Two disjoint edges: all four vertices have identical gain and cost.
        let g = UndirectedGraph::from_edges([(10, 11), (2, 3)]);
        let costs = unit_costs(&g);
        let sel = cost_seeds_greedy(&g, 1.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert_eq!(sel.seeds, vec![2]);
        let lazy = cost_seeds_greedy_lazy(&g, 1.0, &costs, Scorer::CappedCoverage, None).unwrap();
        assert_eq!(lazy.seeds, vec![2]);
    }
}
