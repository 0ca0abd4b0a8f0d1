//! Synthetic benchmark graphs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seedcast_graph::UndirectedGraph;

/// Seeded Erdős–Rényi G(n, p) graph over vertex ids `0..n`.
///
/// Every vertex is registered even when it ends up isolated, so degree and
/// cost maps cover the full id range. Deterministic for a fixed seed.
pub fn gnp_random_graph(n: u64, p: f64, seed: u64) -> UndirectedGraph {
    let g = UndirectedGraph::new();
    let mut rng = StdRng::seed_from_u64(seed);

    for v in 0..n {
        g.add_vertex(v);
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                g.add_edge(u, v);
            }
        }
    }
    g
}
