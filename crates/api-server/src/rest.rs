//! REST API handlers for recommendation requests and operational endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use recs_core::types::{HitStats, ItemId, UserId};
use recs_engine::RecommendationEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub default_k: usize,
    pub start_time: Instant,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendationsQuery {
    /// User to recommend for.
    pub user_id: UserId,
    /// Length of the offline list. Defaults to the configured value.
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendationsResponse {
    pub recs: Vec<ItemId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub ready: bool,
    pub uptime_secs: u64,
}

impl AppState {
    fn k(&self, query: &RecommendationsQuery) -> usize {
        query.k.unwrap_or(self.default_k)
    }
}

/// GET / — Liveness greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "Operations",
    responses((status = 200, description = "Service is up", body = StatusResponse))
)]
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Hello world!".to_string(),
    })
}

/// POST /recommendations — Offline and online recommendations blended.
#[utoipa::path(
    post,
    path = "/recommendations",
    tag = "Recommendations",
    params(RecommendationsQuery),
    responses((status = 200, description = "Blended recommendations", body = RecommendationsResponse))
)]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Json<RecommendationsResponse> {
    let k = state.k(&query);
    metrics::counter!("recs.api.requests", "endpoint" => "recommendations").increment(1);
    let recs = state.engine.recommend(query.user_id, k);
    debug!(user_id = query.user_id, k, count = recs.len(), "Blended recommendations");
    Json(RecommendationsResponse { recs })
}

/// POST /recommendations_offline — Precomputed personal or default list.
#[utoipa::path(
    post,
    path = "/recommendations_offline",
    tag = "Recommendations",
    params(RecommendationsQuery),
    responses((status = 200, description = "Offline recommendations", body = RecommendationsResponse))
)]
pub async fn recommendations_offline(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Json<RecommendationsResponse> {
    let k = state.k(&query);
    metrics::counter!("recs.api.requests", "endpoint" => "recommendations_offline").increment(1);
    Json(RecommendationsResponse {
        recs: state.engine.offline(query.user_id, k),
    })
}

/// POST /recommendations_online — Items similar to the user's latest event.
#[utoipa::path(
    post,
    path = "/recommendations_online",
    tag = "Recommendations",
    params(RecommendationsQuery),
    responses((status = 200, description = "Online recommendations", body = RecommendationsResponse))
)]
pub async fn recommendations_online(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Json<RecommendationsResponse> {
    let k = state.k(&query);
    metrics::counter!("recs.api.requests", "endpoint" => "recommendations_online").increment(1);
    Json(RecommendationsResponse {
        recs: state.engine.online(query.user_id, k),
    })
}

/// GET /stats — Personal and default hit counters.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Operations",
    responses((status = 200, description = "Hit counters", body = HitStats))
)]
pub async fn stats(State(state): State<AppState>) -> Json<HitStats> {
    state.engine.log_stats();
    Json(state.engine.stats())
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ready = state.engine.is_ready();
    Json(HealthResponse {
        status: if ready { "healthy" } else { "degraded" }.to_string(),
        ready,
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — 200 once every store has been loaded.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "All stores loaded"),
        (status = 503, description = "At least one store failed to load")
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.engine.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
