//! OpenAPI specification served at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recommendations API",
        version = "0.1.0",
        description = "Blends precomputed personal recommendations with item-to-item recommendations triggered by the user's latest event.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Recommendations", description = "Blended, offline and online recommendation lists"),
        (name = "Operations", description = "Liveness, readiness, health and hit counters"),
    ),
    paths(
        // Recommendations
        crate::rest::recommendations,
        crate::rest::recommendations_offline,
        crate::rest::recommendations_online,
        // Operations
        crate::rest::root,
        crate::rest::stats,
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        crate::rest::RecommendationsResponse,
        crate::rest::StatusResponse,
        crate::rest::HealthResponse,
        recs_core::types::HitStats,
    ))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
