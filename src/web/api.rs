use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::ripple::{RippleSpreading, SpreadEvent};
use crate::algorithm::{PathResult, ShortestPathAlgorithm};
use crate::graph::directed::DirectedGraph;
use crate::graph::generators::{generate_grid, generate_random_connected};
use crate::graph::traits::{Graph, MutableGraph};
use crate::web::models::*;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);
type Weight = OrderedFloat<f64>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    /// Largest graph a single session may hold
    pub max_nodes: usize,
}

/// Default cap on nodes per session graph
pub const DEFAULT_MAX_NODES: usize = 100_000;

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    fn check_graph_size(&self, node_count: Option<usize>) -> Result<(), ApiError> {
        match node_count {
            Some(n) if n <= self.max_nodes => Ok(()),
            _ => Err(api_error(
                StatusCode::BAD_REQUEST,
                "graph_too_large",
                format!("Graphs are limited to {} nodes", self.max_nodes),
            )),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
        self.sessions.lock().map_err(|_| {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "state_poisoned", "Session store is unavailable".to_string())
        })
    }

    fn insert_session(&self, session: Session) -> Result<(), ApiError> {
        let mut sessions = self.sessions()?;
        if sessions.len() >= self.max_sessions {
            return Err(api_error(
                StatusCode::TOO_MANY_REQUESTS,
                "session_limit",
                format!("Session limit of {} reached", self.max_sessions),
            ));
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    fn graph_of(&self, session_id: Uuid) -> Result<WebGraph, ApiError> {
        self.sessions()?
            .get(&session_id)
            .map(|session| session.graph.clone())
            .ok_or_else(session_not_found)
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(create_graph))
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/paths/:session_id", post(find_path))
        .route("/api/paths/:session_id/compare", post(compare_algorithms))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session))
        .route("/api/health", get(health_check))
}

/// Create a session from an explicit graph
pub async fn create_graph(
    State(state): State<AppState>,
    Json(request): Json<CreateGraphRequest>,
) -> Result<Json<Session>, ApiError> {
    state.check_graph_size(Some(request.node_count))?;
    let mut graph: DirectedGraph<Weight> = DirectedGraph::with_capacity(request.node_count);

    for link in &request.links {
        if !link.weight.is_finite() || link.weight < 0.0 {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_weight",
                format!("Edge {} -> {} has weight {}", link.source, link.target, link.weight),
            ));
        }
        let inserted = if request.undirected {
            graph.add_undirected_edge(link.source, link.target, OrderedFloat(link.weight))
        } else {
            graph.add_edge(link.source, link.target, OrderedFloat(link.weight))
        };
        if !inserted {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_edge",
                format!("Edge references invalid node: {} -> {}", link.source, link.target),
            ));
        }
    }

    let session = Session::new(convert_graph_to_web(&graph));
    state.insert_session(session.clone())?;
    debug!("created session {} ({} nodes)", session.id, request.node_count);

    Ok(Json(session))
}

/// Generate a random graph session
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> Result<Json<Session>, ApiError> {
    let graph = match request.graph_type.as_str() {
        "random" => {
            state.check_graph_size(Some(request.node_count))?;
            if request.max_weight == 0 {
                return Err(api_error(StatusCode::BAD_REQUEST, "invalid_weight", "max_weight must be positive".to_string()));
            }
            generate_random_connected(request.node_count, request.extra_edges, request.max_weight, request.seed)
        }
        "grid" => {
            let (width, height) = request.grid_dimensions.unwrap_or_else(|| {
                let side = (request.node_count as f64).sqrt().ceil() as usize;
                (side, side)
            });
            state.check_graph_size(width.checked_mul(height))?;
            generate_grid(width, height)
        }
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_type",
                format!("Unknown graph type: {}", request.graph_type),
            ));
        }
    };

    let session = Session::new(convert_graph_to_web(&graph));
    state.insert_session(session.clone())?;

    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    Ok(Json(state.graph_of(session_id)?))
}

/// Run a path query on a session graph
pub async fn find_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let web_graph = state.graph_of(session_id)?;
    let graph = convert_web_graph_to_rust(&web_graph)?;

    let start_time = Instant::now();
    let result = match request.algorithm.as_str() {
        "ripple" => RippleSpreading::new()
            .with_arrival_rule(request.arrival_rule)
            .with_max_iterations(request.max_iterations)
            .with_trace(request.trace)
            .find_path(&graph, request.source, request.destination),
        "dijkstra" => Dijkstra::new().find_path(&graph, request.source, request.destination),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_algorithm",
                format!("Unknown algorithm: {}", request.algorithm),
            ));
        }
    };
    let execution_time = start_time.elapsed();

    let result = result.map_err(algorithm_error)?;
    let response = build_response(&request.algorithm, result, execution_time.as_secs_f64() * 1000.0);

    if let Some(session) = state.sessions()?.get_mut(&session_id) {
        mark_path(&mut session.graph, &response.path);
        session.last_result = Some(response.clone());
    }

    Ok(Json(response))
}

/// Run the same query with every algorithm
pub async fn compare_algorithms(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<Vec<PathResponse>>, ApiError> {
    let mut results = Vec::new();

    for algorithm in ["ripple", "dijkstra"] {
        let run = PathRequest {
            algorithm: algorithm.to_string(),
            ..request.clone()
        };
        let result = find_path(State(state.clone()), Path(session_id), Json(run)).await?;
        results.push(result.0);
    }

    if let [ripple, dijkstra] = results.as_slice() {
        if ripple.length != dijkstra.length {
            warn!(
                "session {}: ripple length {:?} differs from dijkstra {:?}",
                session_id, ripple.length, dijkstra.length
            );
        }
    }

    Ok(Json(results))
}

/// List all sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<Uuid>>, ApiError> {
    let session_ids: Vec<Uuid> = state.sessions()?.keys().cloned().collect();
    Ok(Json(session_ids))
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    state
        .sessions()?
        .get(&session_id)
        .cloned()
        .map(Json)
        .ok_or_else(session_not_found)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Helper functions

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found".to_string())
}

fn algorithm_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::InvalidVertex(_)
        | Error::InvalidEdge(_, _)
        | Error::NegativeWeight(_)
        | Error::InvalidWeight(_, _)
        | Error::DegenerateSpeed => (StatusCode::BAD_REQUEST, "invalid_input"),
        Error::IterationLimit(_) => (StatusCode::UNPROCESSABLE_ENTITY, "iteration_limit"),
        Error::AlgorithmError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "algorithm_execution_failed"),
    };
    api_error(status, code, err.to_string())
}

fn build_response(algorithm: &str, result: PathResult<Weight>, execution_time_ms: f64) -> PathResponse {
    let animation_steps = result
        .trace
        .iter()
        .enumerate()
        .map(|(step_id, event)| match event {
            SpreadEvent::Created { step, ripple, epicenter, parent, radius, length } => AnimationStep {
                step_id,
                step_type: "ripple_created".to_string(),
                simulation_step: *step,
                ripple: *ripple,
                node_id: *epicenter,
                parent_ripple: *parent,
                radius: radius.into_inner(),
                description: format!("Ripple {} reached node {} (path length {:.2})", ripple, epicenter, length.into_inner()),
            },
            SpreadEvent::Retired { step, ripple, epicenter, radius } => AnimationStep {
                step_id,
                step_type: "ripple_retired".to_string(),
                simulation_step: *step,
                ripple: *ripple,
                node_id: *epicenter,
                parent_ripple: None,
                radius: radius.into_inner(),
                description: format!("Ripple {} at node {} has no unvisited neighbors", ripple, epicenter),
            },
        })
        .collect();

    PathResponse {
        execution_id: Uuid::new_v4(),
        algorithm: algorithm.to_string(),
        source: result.source,
        destination: result.destination,
        feasible: result.is_feasible(),
        length: result.length.map(|l| l.into_inner()),
        path: result.path,
        execution_time_ms,
        stats: result.stats,
        animation_steps,
        completed_at: chrono::Utc::now(),
    }
}

fn mark_path(graph: &mut WebGraph, path: &[usize]) {
    for node in graph.nodes.iter_mut() {
        node.is_path = path.contains(&node.id);
    }
    for link in graph.links.iter_mut() {
        link.is_path = path
            .windows(2)
            .any(|pair| pair[0] == link.source && pair[1] == link.target);
    }
}

fn convert_graph_to_web(graph: &DirectedGraph<Weight>) -> WebGraph {
    let nodes = (0..graph.vertex_count())
        .map(|i| WebNode {
            id: i,
            label: format!("Node {}", i),
            is_path: false,
        })
        .collect();

    let mut links = Vec::new();
    for u in 0..graph.vertex_count() {
        for (v, weight) in graph.outgoing_edges(u) {
            links.push(WebEdge {
                source: u,
                target: v,
                weight: weight.into_inner(),
                is_path: false,
            });
        }
    }

    WebGraph { nodes, links }
}

fn convert_web_graph_to_rust(web_graph: &WebGraph) -> Result<DirectedGraph<Weight>, ApiError> {
    let mut graph = DirectedGraph::with_capacity(web_graph.nodes.len());

    for edge in &web_graph.links {
        if !graph.add_edge(edge.source, edge.target, OrderedFloat(edge.weight)) {
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "graph_conversion_failed",
                format!("Edge references invalid node: {} -> {}", edge.source, edge.target),
            ));
        }
    }

    Ok(graph)
}
