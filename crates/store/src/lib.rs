//! In-memory lookup stores populated once at startup and read concurrently
//! by the serving path.

#![warn(clippy::unwrap_used)]

pub mod events;
pub mod recommendations;
pub mod similar;

pub use events::EventHistory;
pub use recommendations::{Partition, RecommendationTable};
pub use similar::SimilarityIndex;

use thiserror::Error;

/// Failure of a lookup other than a plain key miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0} has not been loaded")]
    PartitionNotLoaded(&'static str),
}
