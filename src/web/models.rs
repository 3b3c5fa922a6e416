use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::algorithm::ripple::{ArrivalRule, SpreadStats};

/// A node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
    #[serde(default)]
    pub is_path: bool,
}

/// A directed edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    #[serde(default)]
    pub is_path: bool,
}

/// A complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// An explicit graph uploaded by the client
#[derive(Debug, Deserialize)]
pub struct CreateGraphRequest {
    pub node_count: usize,
    pub links: Vec<WebEdge>,
    /// Insert every link in both directions
    #[serde(default)]
    pub undirected: bool,
}

/// Parameters for random graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    /// `random` (connected, undirected) or `grid`
    pub graph_type: String,
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    #[serde(default = "default_extra_edges")]
    pub extra_edges: usize,
    #[serde(default = "default_max_weight")]
    pub max_weight: u32,
    #[serde(default)]
    pub grid_dimensions: Option<(usize, usize)>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_node_count() -> usize { 50 }
fn default_extra_edges() -> usize { 100 }
fn default_max_weight() -> u32 { 100 }

/// Parameters for a path query
#[derive(Debug, Clone, Deserialize)]
pub struct PathRequest {
    /// `ripple` or `dijkstra`
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub source: usize,
    pub destination: usize,
    #[serde(default)]
    pub arrival_rule: ArrivalRule,
    #[serde(default)]
    pub trace: bool,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

fn default_algorithm() -> String { "ripple".to_string() }

/// Response containing a path query result
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub execution_id: Uuid,
    pub algorithm: String,
    pub source: usize,
    pub destination: usize,
    pub feasible: bool,
    pub path: Vec<usize>,
    pub length: Option<f64>,
    pub execution_time_ms: f64,
    pub stats: SpreadStats,
    pub animation_steps: Vec<AnimationStep>,
    pub completed_at: DateTime<Utc>,
}

/// One ripple lifecycle event, flattened for the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationStep {
    pub step_id: usize,
    /// `ripple_created` or `ripple_retired`
    pub step_type: String,
    pub simulation_step: usize,
    pub ripple: usize,
    pub node_id: usize,
    pub parent_ripple: Option<usize>,
    pub radius: f64,
    pub description: String,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session containing graph data and the last query result
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub last_result: Option<PathResponse>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            last_result: None,
            created_at: Utc::now(),
        }
    }
}
