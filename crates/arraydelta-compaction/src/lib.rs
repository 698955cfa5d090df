//! # arraydelta-compaction
//!
//! Diff compaction for sequences that only grow and shrink at their tail.
//!
//! This crate provides:
//! - Compaction: reduce a raw batch of updates to its minimal net diff
//! - Validation: opt-in checks of a batch's preconditions
//! - Compactor: configurable orchestrator with running statistics
//! - DiffRecorder: a reference producer that records and commits its own diffs
//!
//! ## Net effect of a batch
//!
//! For each index touched during a window, only the first `before` and the
//! last `after` matter. Indices whose net effect is no change are dropped,
//! and so is every index created and removed within the window. Removals of
//! pre-existing indices are kept, except the highest one when nothing
//! transient follows it: the consumer learns about that one from the
//! sequence's new length.
//!
//! ## Example
//!
//! ```rust
//! use arraydelta_compaction::compact;
//! use arraydelta_core::Update;
//!
//! let mut batch = vec![
//!     Update::change(2, 1, 2),
//!     Update::placement(5, 9),
//!     Update::change(2, 2, 3),
//!     Update::removal(5, 9),
//! ];
//! compact(&mut batch);
//!
//! assert_eq!(batch, vec![Update::change(2, 1, 3)]);
//! ```

mod compact;
mod compactor;
mod error;
mod recorder;
pub mod validate;

pub use compact::compact;
pub use compactor::{CompactionConfig, CompactionReport, CompactionStats, Compactor};
pub use error::{CompactionError, Result};
pub use recorder::DiffRecorder;
