//! Per-user interaction history used to trigger online recommendations.

use recs_core::config::EventOrder;
use recs_core::types::{EventRecord, UserId};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info};

pub struct EventHistory {
    events: HashMap<UserId, Vec<EventRecord>>,
    max_events_per_user: usize,
    order: EventOrder,
    loaded: bool,
}

impl EventHistory {
    pub fn new(max_events_per_user: usize, order: EventOrder) -> Self {
        Self {
            events: HashMap::new(),
            max_events_per_user,
            order,
            loaded: false,
        }
    }

    /// Replace all history. Events are grouped by user in source order,
    /// then reordered per user if `EventOrder::LatestFirst` is configured.
    /// `max_events_per_user` is not applied here.
    pub fn load<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = (UserId, EventRecord)>,
    {
        info!(order = ?self.order, "Loading events");
        let mut events: HashMap<UserId, Vec<EventRecord>> = HashMap::new();
        let mut rows = 0usize;
        for (user_id, event) in records {
            events.entry(user_id).or_default().push(event);
            rows += 1;
        }

        if self.order == EventOrder::LatestFirst {
            for user_events in events.values_mut() {
                // stable, so equal sequence numbers keep source order
                user_events.sort_by_key(|e| Reverse(e.sequence_number));
            }
        }

        info!(rows, users = events.len(), "Loaded events");
        self.events = events;
        self.loaded = true;
        rows
    }

    /// Up to `k` events for `user_id` in stored order. Unknown users have no
    /// events.
    pub fn get_recent(&self, user_id: UserId, k: usize) -> Vec<EventRecord> {
        debug!(user_id, k, "Event lookup");
        self.events
            .get(&user_id)
            .map(|events| events.iter().take(k).copied().collect())
            .unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn max_events_per_user(&self) -> usize {
        self.max_events_per_user
    }

    pub fn user_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(10, EventOrder::Source)
    }
}
