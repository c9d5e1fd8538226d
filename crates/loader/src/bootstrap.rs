//! Builds the engine from the data directory. A source that fails to load is
//! logged and its store left empty; startup always completes.

use crate::table::read_table;
use recs_core::config::AppConfig;
use recs_core::error::RecsError;
use recs_core::types::{DefaultRecRow, EventRow, PersonalRecRow, SimilarItemRow};
use recs_engine::RecommendationEngine;
use recs_store::{EventHistory, RecommendationTable, SimilarityIndex};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{error, info};

pub const EVENTS: &str = "events";
pub const SIMILAR_ITEMS: &str = "similar_items";
pub const PERSONAL: &str = "personal_recommendations";
pub const DEFAULT: &str = "default_recommendations";

/// Outcome of loading one source table.
#[derive(Debug)]
pub enum SourceStatus {
    Loaded { source: &'static str, rows: usize },
    Failed { source: &'static str, error: RecsError },
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub sources: Vec<SourceStatus>,
}

impl LoadReport {
    pub fn failures(&self) -> impl Iterator<Item = &SourceStatus> {
        self.sources
            .iter()
            .filter(|s| matches!(s, SourceStatus::Failed { .. }))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn rows(&self, source: &str) -> Option<usize> {
        self.sources.iter().find_map(|s| match s {
            SourceStatus::Loaded { source: name, rows } if *name == source => Some(*rows),
            _ => None,
        })
    }
}

/// Load all four tables configured in `config.data` and assemble the engine.
pub fn load_engine(config: &AppConfig) -> (RecommendationEngine, LoadReport) {
    let data = &config.data;
    info!(data_dir = %data.dir.display(), "Loading recommendation data");

    let mut report = LoadReport::default();

    let mut events = EventHistory::new(config.events.max_events_per_user, config.events.order);
    load_source(&mut report, EVENTS, &data.events_path(), |rows: Vec<EventRow>| {
        events.load(rows.into_iter().map(|r| (r.user_id, r.into())))
    });

    let mut similar = SimilarityIndex::new();
    load_source(
        &mut report,
        SIMILAR_ITEMS,
        &data.similar_items_path(),
        |rows: Vec<SimilarItemRow>| similar.load(rows.into_iter().map(|r| (r.track_id, r.into()))),
    );

    let mut recommendations = RecommendationTable::new();
    load_source(
        &mut report,
        PERSONAL,
        &data.personal_path(),
        |rows: Vec<PersonalRecRow>| {
            recommendations.load_personal(rows.into_iter().map(|r| (r.user_id, r.into())))
        },
    );
    load_source(
        &mut report,
        DEFAULT,
        &data.default_path(),
        |rows: Vec<DefaultRecRow>| recommendations.load_default(rows.into_iter().map(Into::into)),
    );

    let engine = RecommendationEngine::new(recommendations, events, similar)
        .with_similar_k(config.similarity.default_k);

    info!(
        loaded = report.sources.len() - report.failures().count(),
        failed = report.failures().count(),
        "Recommendation data loaded"
    );
    (engine, report)
}

fn load_source<T, F>(report: &mut LoadReport, source: &'static str, path: &Path, apply: F)
where
    T: DeserializeOwned,
    F: FnOnce(Vec<T>) -> usize,
{
    match read_table::<T>(source, path) {
        Ok(rows) => {
            let rows = apply(rows);
            report.sources.push(SourceStatus::Loaded { source, rows });
        }
        Err(error) => {
            error!(source, path = %path.display(), error = %error, "Failed to load source");
            report.sources.push(SourceStatus::Failed { source, error });
        }
    }
}
