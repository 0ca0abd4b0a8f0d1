use dashmap::DashMap;

/// Integer vertex identifier.
pub type VertexId = u64;

// ─────────────────────────────────────────────
// UndirectedGraph
// ─────────────────────────────────────────────

/// In-memory undirected adjacency index.
///
/// Backed by `DashMap` — supports concurrent construction without a global
/// lock (fine-grained sharded locking internally). Once built, the graph is
/// treated as read-only for the duration of a selection or simulation run;
/// multiple independent runs may read it in parallel.
///
/// Edges are unordered pairs: `add_edge(u, v)` registers `v` as a neighbor of
/// `u` and `u` as a neighbor of `v`. Duplicate edges and self-loops are
/// ignored.
#[derive(Debug, Default)]
pub struct UndirectedGraph {
    /// vertex id → neighbor ids (unordered, deduplicated)
    adjacency: DashMap<VertexId, Vec<VertexId>>,
}

impl UndirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an in-memory edge list, registering both endpoints.
    pub fn from_edges(edges: impl IntoIterator<Item = (VertexId, VertexId)>) -> Self {
        let g = Self::new();
        for (u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    // ── Mutations ──────────────────────────────────────

    /// Register a vertex with no edges (no-op if already present).
    pub fn add_vertex(&self, v: VertexId) {
        self.adjacency.entry(v).or_default();
    }

    /// Register an undirected edge. Self-loops are ignored; both endpoints
    /// are registered as vertices either way.
    pub fn add_edge(&self, u: VertexId, v: VertexId) {
        if u == v {
            self.add_vertex(u);
            return;
        }
        {
            let mut nu = self.adjacency.entry(u).or_default();
            if !nu.contains(&v) {
                nu.push(v);
            }
        }
        {
            let mut nv = self.adjacency.entry(v).or_default();
            if !nv.contains(&u) {
                nv.push(u);
            }
        }
    }

    // ── Queries ────────────────────────────────────────

    /// All vertex ids in ascending order.
    ///
    /// Selection algorithms iterate this to get a fixed, reproducible
    /// candidate order (ties are broken by lowest id).
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.adjacency.iter().map(|kv| *kv.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Neighbor ids of `v` (empty if the vertex is unknown or isolated).
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.adjacency
            .get(&v)
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Number of neighbors of `v`.
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency.get(&v).map(|n| n.len()).unwrap_or(0)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency
            .get(&u)
            .map(|n| n.contains(&v))
            .unwrap_or(false)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges (each pair counted once).
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.iter().map(|kv| kv.value().len()).sum();
        directed / 2
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
