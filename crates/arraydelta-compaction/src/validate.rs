//! Precondition checks for raw batches.
//!
//! Compaction trusts its input. These checks are for producers under
//! development and for the [`Compactor`](crate::Compactor) when its
//! configuration asks for verification. All of them expect a batch that is
//! already stably sorted by index.

use crate::error::{CompactionError, Result};
use arraydelta_core::Update;

/// Check that `batch` is sorted by non-decreasing index.
pub fn is_sorted_by_index<V>(batch: &[Update<V>]) -> bool {
    batch.windows(2).all(|pair| pair[0].index <= pair[1].index)
}

/// Check that the updates for each index chain together.
///
/// Within a run sharing an index, every update must start from the value
/// the previous one left behind. A raw update absent on both sides is
/// rejected outright.
pub fn check_lineage<V: PartialEq>(batch: &[Update<V>]) -> Result<()> {
    debug_assert!(is_sorted_by_index(batch));

    if let Some(update) = batch.iter().find(|u| u.is_transient()) {
        return Err(CompactionError::MalformedUpdate {
            index: update.index,
        });
    }

    for pair in batch.windows(2) {
        if pair[0].index == pair[1].index && pair[0].after != pair[1].before {
            return Err(CompactionError::BrokenLineage {
                index: pair[1].index,
            });
        }
    }

    Ok(())
}

/// Check that indices ending absent form a suffix of the batch.
///
/// The net effect of an index is absent when its last update is a
/// tombstone. A sequence that only grows and shrinks at its tail can never
/// end a window with a gap below a surviving index.
pub fn check_tail_anchored<V>(batch: &[Update<V>]) -> Result<()> {
    debug_assert!(is_sorted_by_index(batch));

    let mut first_absent = None;

    for group in batch.chunk_by(|a, b| a.index == b.index) {
        let last = &group[group.len() - 1];
        match (first_absent, last.is_tombstone()) {
            (None, true) => first_absent = Some(last.index),
            (Some(index), false) => {
                return Err(CompactionError::TailInvariantViolated {
                    index,
                    survivor: last.index,
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// True if every index in the sorted `batch` ends absent.
pub(crate) fn ends_absent<V>(batch: &[Update<V>]) -> bool {
    batch
        .chunk_by(|a, b| a.index == b.index)
        .all(|group| group[group.len() - 1].is_tombstone())
}
