//! Item-to-item similarity lists, ranked as delivered by the source table.

use crate::LookupError;
use recs_core::types::{ItemId, SimilarItem};
use std::collections::HashMap;
use tracing::{debug, error, info};

#[derive(Default)]
pub struct SimilarityIndex {
    similar: Option<HashMap<ItemId, Vec<SimilarItem>>>,
}

impl SimilarityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index. Rows are grouped by source item keeping their order.
    pub fn load<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = (ItemId, SimilarItem)>,
    {
        info!("Loading similar items");
        let mut similar: HashMap<ItemId, Vec<SimilarItem>> = HashMap::new();
        let mut rows = 0usize;
        for (item_id, neighbour) in records {
            similar.entry(item_id).or_default().push(neighbour);
            rows += 1;
        }
        info!(rows, items = similar.len(), "Loaded similar items");
        self.similar = Some(similar);
        rows
    }

    pub fn is_loaded(&self) -> bool {
        self.similar.is_some()
    }

    /// Up to `k` neighbours of `item_id`. Unknown items and an unloaded index
    /// both give an empty list.
    pub fn get_similar(&self, item_id: ItemId, k: usize) -> Vec<SimilarItem> {
        debug!(item_id, k, "Similar items lookup");
        match self.lookup(item_id) {
            Ok(Some(neighbours)) => neighbours.iter().take(k).copied().collect(),
            Ok(None) => {
                debug!(item_id, "No similar items found");
                Vec::new()
            }
            Err(e) => {
                error!(item_id, error = %e, "Error retrieving similar items");
                Vec::new()
            }
        }
    }

    fn lookup(&self, item_id: ItemId) -> Result<Option<&[SimilarItem]>, LookupError> {
        let similar = self
            .similar
            .as_ref()
            .ok_or(LookupError::PartitionNotLoaded("similar items"))?;
        Ok(similar.get(&item_id).map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbour(recommended_item_id: i64, score: f64) -> SimilarItem {
        SimilarItem {
            recommended_item_id,
            score,
        }
    }

    fn sample_index() -> SimilarityIndex {
        let mut index = SimilarityIndex::new();
        index.load(vec![
            (1, neighbour(2, 0.9)),
            (1, neighbour(3, 0.8)),
            (1, neighbour(4, 0.1)),
            (5, neighbour(6, 0.5)),
        ]);
        index
    }

    #[test]
    fn test_ranked_as_stored() {
        let index = sample_index();
        assert_eq!(
            index.get_similar(1, 10),
            vec![neighbour(2, 0.9), neighbour(3, 0.8), neighbour(4, 0.1)]
        );
    }

    #[test]
    fn test_never_more_than_k() {
        let index = sample_index();
        for k in 0..5 {
            assert!(index.get_similar(1, k).len() <= k);
        }
        assert_eq!(index.get_similar(1, 2).len(), 2);
    }

    #[test]
    fn test_unknown_item_is_empty() {
        let index = sample_index();
        assert!(index.get_similar(999, 10).is_empty());
    }

    #[test]
    fn test_unloaded_index_is_empty() {
        let index = SimilarityIndex::new();
        assert!(!index.is_loaded());
        assert!(index.get_similar(1, 10).is_empty());
    }
}
