//! Stateless orchestration over the three immutable stores.

use crate::blend::blend;
use recs_core::types::{HitStats, ItemId, UserId};
use recs_store::{EventHistory, Partition, RecommendationTable, SimilarityIndex};
use tracing::debug;

/// Breadth of the similarity lookup when none is configured.
pub const DEFAULT_SIMILAR_K: usize = 10;

/// Owns the loaded stores. Built once at startup and shared by reference
/// with the request handlers.
pub struct RecommendationEngine {
    recommendations: RecommendationTable,
    events: EventHistory,
    similar: SimilarityIndex,
    similar_k: usize,
}

impl RecommendationEngine {
    pub fn new(
        recommendations: RecommendationTable,
        events: EventHistory,
        similar: SimilarityIndex,
    ) -> Self {
        Self {
            recommendations,
            events,
            similar,
            similar_k: DEFAULT_SIMILAR_K,
        }
    }

    /// Override the number of neighbours fetched for the online list.
    pub fn with_similar_k(mut self, similar_k: usize) -> Self {
        self.similar_k = similar_k;
        self
    }

    /// Precomputed list for `user_id`, personal or default, as item ids.
    pub fn offline(&self, user_id: UserId, k: usize) -> Vec<ItemId> {
        self.recommendations
            .get_personalized(user_id, k)
            .into_iter()
            .map(|entry| entry.item_id)
            .collect()
    }

    /// Neighbours of the user's first stored event. `k` does not bound the
    /// result: the similarity lookup always uses the configured breadth.
    pub fn online(&self, user_id: UserId, k: usize) -> Vec<ItemId> {
        let Some(event) = self.events.get_recent(user_id, 1).into_iter().next() else {
            debug!(user_id, "No events for online recommendations");
            return Vec::new();
        };
        debug!(user_id, k, item_id = event.item_id, "Online recommendations from event");

        self.similar
            .get_similar(event.item_id, self.similar_k)
            .into_iter()
            .map(|neighbour| neighbour.recommended_item_id)
            .collect()
    }

    /// Blend of `offline(user_id, k)` and `online(user_id, k)`.
    pub fn recommend(&self, user_id: UserId, k: usize) -> Vec<ItemId> {
        let offline = self.offline(user_id, k);
        let online = self.online(user_id, k);
        blend(&offline, &online)
    }

    pub fn stats(&self) -> HitStats {
        self.recommendations.stats()
    }

    pub fn log_stats(&self) {
        self.recommendations.log_stats();
    }

    /// True once every store has been populated.
    pub fn is_ready(&self) -> bool {
        self.recommendations.is_loaded(Partition::Personal)
            && self.recommendations.is_loaded(Partition::Default)
            && self.events.is_loaded()
            && self.similar.is_loaded()
    }

    pub fn similar_k(&self) -> usize {
        self.similar_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recs_core::types::{EventRecord, RecommendationEntry, SimilarItem};

    fn entry(item_id: i64) -> RecommendationEntry {
        RecommendationEntry {
            item_id,
            score: Some(1.0),
        }
    }

    fn event(item_id: i64, sequence_number: i64) -> EventRecord {
        EventRecord {
            item_id,
            sequence_number,
        }
    }

    fn neighbour(recommended_item_id: i64) -> SimilarItem {
        SimilarItem {
            recommended_item_id,
            score: 0.5,
        }
    }

    fn sample_engine() -> RecommendationEngine {
        let mut recommendations = RecommendationTable::new();
        recommendations.load_personal(vec![(1, entry(1)), (1, entry(2)), (1, entry(3))]);
        recommendations.load_default(vec![entry(900), entry(901)]);

        let mut events = EventHistory::default();
        events.load(vec![(1, event(55, 2)), (1, event(66, 1)), (3, event(77, 1))]);

        let mut similar = SimilarityIndex::new();
        similar.load(
            (0..15)
                .map(|i| (55, neighbour(500 + i)))
                .chain([(66, neighbour(600))]),
        );

        RecommendationEngine::new(recommendations, events, similar)
    }

    #[test]
    fn test_offline_drops_scores() {
        let engine = sample_engine();
        assert_eq!(engine.offline(1, 2), vec![1, 2]);
        assert_eq!(engine.offline(2, 10), vec![900, 901]);
    }

    #[test]
    fn test_online_uses_first_event() {
        let engine = sample_engine();
        let online = engine.online(1, 3);
        assert_eq!(online.first(), Some(&500));
    }

    #[test]
    fn test_online_ignores_k() {
        let engine = sample_engine();
        assert_eq!(engine.online(1, 1).len(), DEFAULT_SIMILAR_K);
        assert_eq!(engine.online(1, 100).len(), DEFAULT_SIMILAR_K);
    }

    #[test]
    fn test_online_configured_breadth() {
        let engine = sample_engine().with_similar_k(4);
        assert_eq!(engine.online(1, 10), vec![500, 501, 502, 503]);
    }

    #[test]
    fn test_online_without_events_is_empty() {
        let engine = sample_engine();
        assert!(engine.online(2, 10).is_empty());
    }

    #[test]
    fn test_online_event_without_neighbours_is_empty() {
        let engine = sample_engine();
        assert!(engine.online(3, 10).is_empty());
    }

    #[test]
    fn test_recommend_blends() {
        let engine = sample_engine().with_similar_k(2);
        // offline [1, 2, 3], online [500, 501]
        assert_eq!(engine.recommend(1, 10), vec![1, 501, 3]);
        // default only, no events
        assert_eq!(engine.recommend(2, 10), vec![900, 901]);
    }

    #[test]
    fn test_ready_after_load() {
        assert!(sample_engine().is_ready());
        let engine = RecommendationEngine::new(
            RecommendationTable::new(),
            EventHistory::default(),
            SimilarityIndex::new(),
        );
        assert!(!engine.is_ready());
        assert!(engine.recommend(1, 10).is_empty());
    }
}
