//! Precomputed recommendation lists: a personalised partition keyed by user
//! and a single popularity list used when a user has no personal entry.

use crate::LookupError;
use recs_core::types::{HitStats, RecommendationEntry, UserId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

/// Named partition of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Personal,
    Default,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Personal => f.write_str("personal"),
            Partition::Default => f.write_str("default"),
        }
    }
}

/// Where a served list came from.
enum Source<'a> {
    Personal(&'a [RecommendationEntry]),
    Default(&'a [RecommendationEntry]),
}

#[derive(Default)]
pub struct RecommendationTable {
    personal: Option<HashMap<UserId, Vec<RecommendationEntry>>>,
    default: Option<Vec<RecommendationEntry>>,
    personal_hits: AtomicU64,
    default_hits: AtomicU64,
}

impl RecommendationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the personal partition. Rows are grouped by user, keeping
    /// their relative order as the rank.
    pub fn load_personal<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = (UserId, RecommendationEntry)>,
    {
        info!(partition = %Partition::Personal, "Loading recommendations");
        let mut personal: HashMap<UserId, Vec<RecommendationEntry>> = HashMap::new();
        let mut rows = 0usize;
        for (user_id, entry) in records {
            personal.entry(user_id).or_default().push(entry);
            rows += 1;
        }
        info!(
            partition = %Partition::Personal,
            rows,
            users = personal.len(),
            "Loaded recommendations"
        );
        self.personal = Some(personal);
        rows
    }

    /// Replace the default partition.
    pub fn load_default<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = RecommendationEntry>,
    {
        info!(partition = %Partition::Default, "Loading recommendations");
        let default: Vec<RecommendationEntry> = records.into_iter().collect();
        let rows = default.len();
        info!(partition = %Partition::Default, rows, "Loaded recommendations");
        self.default = Some(default);
        rows
    }

    pub fn is_loaded(&self, partition: Partition) -> bool {
        match partition {
            Partition::Personal => self.personal.is_some(),
            Partition::Default => self.default.is_some(),
        }
    }

    /// Up to `k` entries for `user_id`, falling back to the default list when
    /// the user has no personal entry. Never fails: an unloaded personal
    /// partition is logged and served as an empty list.
    pub fn get_personalized(&self, user_id: UserId, k: usize) -> Vec<RecommendationEntry> {
        debug!(user_id, k, "Recommendation lookup");
        let recs = match self.lookup(user_id) {
            Ok(Source::Personal(entries)) => {
                self.personal_hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("recs.store.personal_hits").increment(1);
                head(entries, k)
            }
            Ok(Source::Default(entries)) => {
                self.default_hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("recs.store.default_hits").increment(1);
                head(entries, k)
            }
            Err(e) => {
                error!(user_id, error = %e, "No recommendations found");
                Vec::new()
            }
        };
        debug!(stats = ?self.stats(), "Recommendation stats");
        recs
    }

    /// Personal list if present, otherwise the default list. An absent
    /// default partition reads as an empty list.
    fn lookup(&self, user_id: UserId) -> Result<Source<'_>, LookupError> {
        let personal = self
            .personal
            .as_ref()
            .ok_or(LookupError::PartitionNotLoaded("personal recommendations"))?;

        Ok(personal
            .get(&user_id)
            .map(|entries| Source::Personal(entries.as_slice()))
            .unwrap_or_else(|| Source::Default(self.default_entries())))
    }

    fn default_entries(&self) -> &[RecommendationEntry] {
        match &self.default {
            Some(entries) => entries,
            None => {
                warn!("Default recommendations not loaded, serving empty list");
                &[]
            }
        }
    }

    pub fn stats(&self) -> HitStats {
        HitStats {
            request_personal_count: self.personal_hits.load(Ordering::Relaxed),
            request_default_count: self.default_hits.load(Ordering::Relaxed),
        }
    }

    /// Write the hit counters to the log.
    pub fn log_stats(&self) {
        let stats = self.stats();
        info!(
            request_personal_count = stats.request_personal_count,
            request_default_count = stats.request_default_count,
            "Stats for recommendations"
        );
    }
}

fn head(entries: &[RecommendationEntry], k: usize) -> Vec<RecommendationEntry> {
    entries.iter().take(k).copied().collect()
}
