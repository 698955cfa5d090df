//! Error types for the compaction layer.

use thiserror::Error;

/// Errors reported by opt-in validation and the reference recorder.
///
/// Compaction itself never fails; these only surface when a batch is
/// checked against its preconditions or a recorder is misused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompactionError {
    #[error("Broken lineage at index {index}: update does not start from the previous value")]
    BrokenLineage { index: usize },

    #[error("Malformed update at index {index}: absent both before and after")]
    MalformedUpdate { index: usize },

    #[error("Index {index} ends absent but a higher index {survivor} still exists")]
    TailInvariantViolated { index: usize, survivor: usize },

    #[error("Invalid index: {index} (length: {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CompactionError {
    fn from(err: serde_json::Error) -> Self {
        CompactionError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompactionError>;
