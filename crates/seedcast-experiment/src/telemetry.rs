//! Append-only CSV result sink.
//!
//! One logical experiment is a sequence of rows appended to the same file;
//! the header is written only when the file is created. Set-valued fields
//! (seed set, influence set) cross the boundary as JSON-encoded ascending
//! id lists, so downstream tooling can replay a seed set from any row.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use seedcast_graph::{UndirectedGraph, VertexId};

/// One selector run.
#[derive(Debug, Clone)]
pub struct ExperimentRecord {
    pub timestamp: i64,
    pub algorithm: String,
    pub cost_model: String,
    pub use_threshold: bool,
    pub budget: f64,
    pub num_nodes: usize,
    pub num_edges: usize,
    /// Selected vertex ids, ascending.
    pub seed_set: Vec<VertexId>,
    pub total_cost: f64,
    pub execution_time_ms: u64,
    /// Free-form metadata, serialized as JSON.
    pub additional_info: serde_json::Value,
}

impl ExperimentRecord {
    pub fn new(
        algorithm: &str,
        cost_model: &str,
        use_threshold: bool,
        budget: f64,
        graph: &UndirectedGraph,
        seed_set: Vec<VertexId>,
        total_cost: f64,
        execution_time_ms: u64,
        additional_info: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: now_unix(),
            algorithm: algorithm.to_string(),
            cost_model: cost_model.to_string(),
            use_threshold,
            budget,
            num_nodes: graph.vertex_count(),
            num_edges: graph.edge_count(),
            seed_set,
            total_cost,
            execution_time_ms,
            additional_info,
        }
    }
}

/// One cascade evaluation of a previously selected seed set.
#[derive(Debug, Clone)]
pub struct CascadeRecord {
    pub timestamp: i64,
    pub algorithm: String,
    pub seed_set: Vec<VertexId>,
    pub final_influence: Vec<VertexId>,
    pub num_nodes: usize,
    pub num_edges: usize,
    /// Row index of the experiment record this seed set came from.
    pub experiment_row: usize,
    pub rounds: usize,
    pub execution_time_ms: u64,
    pub additional_info: serde_json::Value,
}

const EXPERIMENT_HEADER: &str = "timestamp,algorithm,cost_model,use_threshold,budget,num_nodes,\
num_edges,seed_set,num_seeds,total_cost,execution_time_ms,additional_info";

const CASCADE_HEADER: &str = "timestamp,algorithm,seed_set,seed_size,final_influence,\
final_influence_size,num_nodes,num_edges,experiment_row,rounds,execution_time_ms,additional_info";

/// Append one selector-run row, writing the header if the file is new.
pub fn append_experiment(path: &Path, record: &ExperimentRecord) -> std::io::Result<()> {
    let mut w = open_append(path, EXPERIMENT_HEADER)?;
    writeln!(
        w,
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        record.timestamp,
        record.algorithm,
        record.cost_model,
        record.use_threshold,
        record.budget,
        record.num_nodes,
        record.num_edges,
        csv_quote(&json_ids(&record.seed_set)),
        record.seed_set.len(),
        record.total_cost,
        record.execution_time_ms,
        csv_quote(&record.additional_info.to_string()),
    )?;
    w.flush()
}

/// Append one cascade row, writing the header if the file is new.
pub fn append_cascade(path: &Path, record: &CascadeRecord) -> std::io::Result<()> {
    let mut w = open_append(path, CASCADE_HEADER)?;
    writeln!(
        w,
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        record.timestamp,
        record.algorithm,
        csv_quote(&json_ids(&record.seed_set)),
        record.seed_set.len(),
        csv_quote(&json_ids(&record.final_influence)),
        record.final_influence.len(),
        record.num_nodes,
        record.num_edges,
        record.experiment_row,
        record.rounds,
        record.execution_time_ms,
        csv_quote(&record.additional_info.to_string()),
    )?;
    w.flush()
}

fn open_append(path: &Path, header: &str) -> std::io::Result<BufWriter<std::fs::File>> {
    let is_new = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut w = BufWriter::new(file);
    if is_new {
        writeln!(w, "{header}")?;
    }
    Ok(w)
}

fn json_ids(ids: &[VertexId]) -> String {
    // Ids are kept sorted by the producers; serialize as a JSON array.
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

/// Quote a field for CSV, doubling any embedded quotes.
fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
