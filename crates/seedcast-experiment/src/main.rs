//! # seedcast budget-sweep experiment
//!
//! Sweeps a budget range with one selector over a seeded synthetic graph,
//! logs every selection to an append-only CSV, and scores each produced seed
//! set with the majority cascade.
//!
//! ## Usage
//!
//! ```text
//! experiment --algorithm csg-lazy --scorer 1 --cost-model half-degree \
//!            --nodes 500 --edge-prob 0.02 --seed 42 \
//!            --budget-min 10 --budget-max 100 --budget-step 10 \
//!            --out-dir ./logs
//! ```
//!
//! Output: `results_{algorithm}.csv` and `cascade_{algorithm}.csv` in the
//! output directory.

use std::collections::HashMap;
use std::path::PathBuf;

use seedcast_algo::{
    cost_seeds_greedy, cost_seeds_greedy_lazy, majority_cascade, wtss, Scorer, SeedSelection,
    SelectionError,
};
use seedcast_experiment::synth::gnp_random_graph;
use seedcast_experiment::telemetry::{
    append_cascade, append_experiment, now_unix, CascadeRecord, ExperimentRecord,
};
use seedcast_graph::{
    half_degree_costs, majority_thresholds, random_costs, UndirectedGraph, VertexId,
};

// ─────────────────────────────────────────────
// Experiment configuration
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Csg,
    CsgLazy,
    Wtss,
}

impl Algorithm {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csg" => Some(Self::Csg),
            "csg-lazy" => Some(Self::CsgLazy),
            "wtss" => Some(Self::Wtss),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Csg => "CSG",
            Self::CsgLazy => "CSG-lazy",
            Self::Wtss => "WTSS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostModel {
    HalfDegree,
    Random,
}

impl CostModel {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "half-degree" => Some(Self::HalfDegree),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::HalfDegree => "half_degree",
            Self::Random => "random",
        }
    }

    fn assign(&self, graph: &UndirectedGraph, seed: u64) -> HashMap<VertexId, f64> {
        match self {
            Self::HalfDegree => half_degree_costs(graph),
            Self::Random => random_costs(graph, seed),
        }
    }
}

struct ExperimentConfig {
    algorithm: Algorithm,
    scorer: Scorer,
    cost_model: CostModel,
    nodes: u64,
    edge_prob: f64,
    seed: u64,
    budget_min: f64,
    budget_max: f64,
    budget_step: f64,
    out_dir: PathBuf,
}

// ─────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seedcast_experiment=info".into()),
        )
        .init();

    let config = parse_args();
    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "experiment failed");
        std::process::exit(1);
    }
}

fn run(config: &ExperimentConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        algorithm = config.algorithm.label(),
        scorer = config.scorer.label(),
        cost_model = config.cost_model.label(),
        nodes = config.nodes,
        "Starting budget sweep"
    );

    let graph = gnp_random_graph(config.nodes, config.edge_prob, config.seed);
    let costs = config.cost_model.assign(&graph, config.seed);
    let thresholds = majority_thresholds(&graph);

    tracing::info!(
        nodes = graph.vertex_count(),
        edges = graph.edge_count(),
        "Graph built"
    );

    std::fs::create_dir_all(&config.out_dir)?;
    let results_csv = config
        .out_dir
        .join(format!("results_{}.csv", config.algorithm.label()));
    let cascade_csv = config
        .out_dir
        .join(format!("cascade_{}.csv", config.algorithm.label()));

    // Resume state threaded through the sweep: CSG extends the previous
    // budget's selection instead of restarting.
    let mut previous: Option<SeedSelection> = None;
    let mut row = 0usize;

    let mut budget = config.budget_min;
    while budget <= config.budget_max {
        let selection = select(config, &graph, &costs, &thresholds, budget, &previous)?;

        tracing::info!(
            budget,
            seeds = selection.seeds.len(),
            total_cost = selection.total_cost,
            duration_ms = selection.duration_ms,
            "Selection complete"
        );

        append_experiment(
            &results_csv,
            &ExperimentRecord::new(
                config.algorithm.label(),
                config.cost_model.label(),
                config.algorithm == Algorithm::Wtss,
                budget,
                &graph,
                selection.seeds.clone(),
                selection.total_cost,
                selection.duration_ms,
                serde_json::json!({
                    "scorer": config.scorer.label(),
                    "graph_seed": config.seed,
                }),
            ),
        )?;

        let outcome = majority_cascade(&graph, &selection.seeds);
        tracing::info!(
            budget,
            influenced = outcome.influenced.len(),
            rounds = outcome.rounds,
            "Cascade complete"
        );

        append_cascade(
            &cascade_csv,
            &CascadeRecord {
                timestamp: now_unix(),
                algorithm: "MajorityCascade".to_string(),
                seed_set: selection.seeds.clone(),
                final_influence: outcome.influenced,
                num_nodes: graph.vertex_count(),
                num_edges: graph.edge_count(),
                experiment_row: row,
                rounds: outcome.rounds,
                execution_time_ms: outcome.duration_ms,
                additional_info: serde_json::Value::Null,
            },
        )?;

        previous = Some(selection);
        row += 1;
        budget += config.budget_step;
    }

    tracing::info!(
        results = %results_csv.display(),
        cascade = %cascade_csv.display(),
        "Sweep complete"
    );
    Ok(())
}

fn select(
    config: &ExperimentConfig,
    graph: &UndirectedGraph,
    costs: &HashMap<VertexId, f64>,
    thresholds: &HashMap<VertexId, usize>,
    budget: f64,
    previous: &Option<SeedSelection>,
) -> Result<SeedSelection, SelectionError> {
    let resume = previous.as_ref().map(|s| s.resume_state());
    match config.algorithm {
        Algorithm::Csg => cost_seeds_greedy(graph, budget, costs, config.scorer, resume),
        Algorithm::CsgLazy => cost_seeds_greedy_lazy(graph, budget, costs, config.scorer, resume),
        // WTSS has no incremental form; each budget runs from scratch.
        Algorithm::Wtss => wtss(graph, thresholds, costs, budget),
    }
}

// ─────────────────────────────────────────────
// Argument parsing
// ─────────────────────────────────────────────

/// Minimal argument parser (no external deps).
fn parse_args() -> ExperimentConfig {
    let args: Vec<String> = std::env::args().collect();

    let mut algorithm = Algorithm::CsgLazy;
    let mut scorer = Scorer::CappedCoverage;
    let mut cost_model = CostModel::HalfDegree;
    let mut nodes: u64 = 500;
    let mut edge_prob = 0.02;
    let mut seed: u64 = 42;
    let mut budget_min = 10.0;
    let mut budget_max = 100.0;
    let mut budget_step = 10.0;
    let mut out_dir = PathBuf::from("./logs");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--algorithm" => {
                i += 1;
                algorithm = Algorithm::from_str(&args[i]).unwrap_or_else(|| {
                    eprintln!("Unknown algorithm '{}'. Use: csg, csg-lazy, wtss", args[i]);
                    std::process::exit(1);
                });
            }
            "--scorer" => {
                i += 1;
                scorer = match args[i].as_str() {
                    "1" => Scorer::CappedCoverage,
                    "2" => Scorer::TriangularBonus,
                    "3" => Scorer::NormalizedTriangularBonus,
                    other => {
                        eprintln!("Unknown scorer '{other}'. Use: 1, 2, 3");
                        std::process::exit(1);
                    }
                };
            }
            "--cost-model" => {
                i += 1;
                cost_model = CostModel::from_str(&args[i]).unwrap_or_else(|| {
                    eprintln!("Unknown cost model '{}'. Use: half-degree, random", args[i]);
                    std::process::exit(1);
                });
            }
            "--nodes" => {
                i += 1;
                nodes = args[i].parse().unwrap_or(500);
            }
            "--edge-prob" => {
                i += 1;
                edge_prob = args[i].parse().unwrap_or(0.02);
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--budget-min" => {
                i += 1;
                budget_min = args[i].parse().unwrap_or(10.0);
            }
            "--budget-max" => {
                i += 1;
                budget_max = args[i].parse().unwrap_or(100.0);
            }
            "--budget-step" => {
                i += 1;
                budget_step = args[i].parse().unwrap_or(10.0);
            }
            "--out-dir" => {
                i += 1;
                out_dir = PathBuf::from(&args[i]);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: experiment [--algorithm csg|csg-lazy|wtss] [--scorer 1|2|3] \
                     [--cost-model half-degree|random] [--nodes N] [--edge-prob P] [--seed N] \
                     [--budget-min N] [--budget-max N] [--budget-step N] [--out-dir PATH]"
                );
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    if budget_step <= 0.0 {
        eprintln!("--budget-step must be positive");
        std::process::exit(1);
    }

    ExperimentConfig {
        algorithm,
        scorer,
        cost_model,
        nodes,
        edge_prob,
        seed,
        budget_min,
        budget_max,
        budget_step,
        out_dir,
    }
}
