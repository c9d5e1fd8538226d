//! Recommendation engine — blends precomputed (offline) recommendations with
//! event-triggered (online) item-to-item recommendations.

#![warn(clippy::unwrap_used)]

pub mod blend;
pub mod engine;

pub use blend::blend;
pub use engine::RecommendationEngine;
