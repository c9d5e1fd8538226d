use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User identifier as it appears in the source tables.
pub type UserId = i64;

/// Track (item) identifier as it appears in the source tables.
pub type ItemId = i64;

/// One ranked entry of a precomputed recommendation list.
/// Position in the containing list is the rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub item_id: ItemId,
    pub score: Option<f64>,
}

/// A past user interaction with a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub item_id: ItemId,
    pub sequence_number: i64,
}

/// A neighbour of some item in the item-to-item similarity table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarItem {
    pub recommended_item_id: ItemId,
    pub score: f64,
}

/// Observability counters of the personal/default recommendation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HitStats {
    pub request_personal_count: u64,
    pub request_default_count: u64,
}

// ─── Source rows ────────────────────────────────────────────────────────────
// Column names follow the exported tables.

/// Row of the user event log (`events_train_sample`).
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub user_id: UserId,
    pub track_id: ItemId,
    pub track_seq: i64,
}

/// Row of the item-to-item table (`als_I2I_recommendations_sample`).
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarItemRow {
    pub track_id: ItemId,
    pub track_id_recommended: ItemId,
    pub score: f64,
}

/// Row of the personalised recommendation table (`als_recommendations_sample`).
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalRecRow {
    pub user_id: UserId,
    pub track_id: ItemId,
    pub score: f64,
}

/// Row of the popularity fallback table (`top_popular`).
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultRecRow {
    pub track_id: ItemId,
    pub score: f64,
}

impl From<EventRow> for EventRecord {
    fn from(row: EventRow) -> Self {
        Self {
            item_id: row.track_id,
            sequence_number: row.track_seq,
        }
    }
}

impl From<SimilarItemRow> for SimilarItem {
    fn from(row: SimilarItemRow) -> Self {
        Self {
            recommended_item_id: row.track_id_recommended,
            score: row.score,
        }
    }
}

impl From<PersonalRecRow> for RecommendationEntry {
    fn from(row: PersonalRecRow) -> Self {
        Self {
            item_id: row.track_id,
            score: Some(row.score),
        }
    }
}

impl From<DefaultRecRow> for RecommendationEntry {
    fn from(row: DefaultRecRow) -> Self {
        Self {
            item_id: row.track_id,
            score: Some(row.score),
        }
    }
}
