//! End-to-end HTTP flow over fixture stores, driven in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use recs_api::build_router;
use recs_core::types::{EventRecord, HitStats, RecommendationEntry, SimilarItem};
use recs_engine::RecommendationEngine;
use recs_store::{EventHistory, RecommendationTable, SimilarityIndex};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn entry(item_id: i64) -> RecommendationEntry {
    RecommendationEntry {
        item_id,
        score: Some(1.0),
    }
}

fn fixture_engine() -> RecommendationEngine {
    let mut recommendations = RecommendationTable::new();
    recommendations.load_personal((1..=5).map(|i| (1, entry(i))));
    recommendations.load_default(vec![entry(900), entry(901), entry(902)]);

    let mut events = EventHistory::default();
    events.load(vec![(
        1,
        EventRecord {
            item_id: 55,
            sequence_number: 1,
        },
    )]);

    let mut similar = SimilarityIndex::new();
    similar.load((0..3).map(|i| {
        (
            55,
            SimilarItem {
                recommended_item_id: 500 + i,
                score: 1.0 - i as f64 * 0.1,
            },
        )
    }));

    RecommendationEngine::new(recommendations, events, similar)
}

fn app() -> Router {
    build_router(Arc::new(fixture_engine()), 10)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_root_greeting() {
    let (status, body) = send(app(), Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Hello world!");
}

#[tokio::test]
async fn test_blended_recommendations() {
    // offline [1, 2, 3, 4], online [500, 501, 502]
    let (status, body) = send(app(), Method::POST, "/recommendations?user_id=1&k=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recs"], serde_json::json!([1, 501, 3, 4]));
}

#[tokio::test]
async fn test_default_k() {
    // offline [1..=5] (k defaults to 10), online [500, 501, 502]
    let (_, body) = send(app(), Method::POST, "/recommendations?user_id=1").await;
    assert_eq!(body["recs"], serde_json::json!([1, 501, 3, 4, 5]));
}

#[tokio::test]
async fn test_unknown_user_gets_default() {
    let (status, body) = send(app(), Method::POST, "/recommendations?user_id=77&k=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recs"], serde_json::json!([900, 901]));
}

#[tokio::test]
async fn test_offline_and_online_endpoints() {
    let (_, offline) = send(app(), Method::POST, "/recommendations_offline?user_id=1&k=2").await;
    assert_eq!(offline["recs"], serde_json::json!([1, 2]));

    let (_, online) = send(app(), Method::POST, "/recommendations_online?user_id=1&k=1").await;
    assert_eq!(online["recs"], serde_json::json!([500, 501, 502]));

    let (_, empty) = send(app(), Method::POST, "/recommendations_online?user_id=2").await;
    assert_eq!(empty["recs"], serde_json::json!([]));
}

#[tokio::test]
async fn test_missing_user_id_rejected() {
    let (status, _) = send(app(), Method::POST, "/recommendations").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_reflect_lookups() {
    let app = app();
    send(app.clone(), Method::POST, "/recommendations?user_id=1").await;
    send(app.clone(), Method::POST, "/recommendations?user_id=2").await;
    send(app.clone(), Method::POST, "/recommendations?user_id=3").await;

    let (status, body) = send(app, Method::GET, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats: HitStats = serde_json::from_value(body).unwrap();
    assert_eq!(stats.request_personal_count, 1);
    assert_eq!(stats.request_default_count, 2);
}

#[tokio::test]
async fn test_readiness_follows_loading() {
    let (status, _) = send(app(), Method::GET, "/ready").await;
    assert_eq!(status, StatusCode::OK);

    let empty = RecommendationEngine::new(
        RecommendationTable::new(),
        EventHistory::default(),
        SimilarityIndex::new(),
    );
    let (status, _) = send(build_router(Arc::new(empty), 10), Method::GET, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = send(app(), Method::GET, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/recommendations"].is_object());
}
