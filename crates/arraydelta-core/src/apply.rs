//! Applying a compacted diff to an observed snapshot.
//!
//! Shrinking is conveyed by the new length, which the caller tracks
//! separately. Removal records that survive compaction describe positions
//! past that length and carry nothing to write.

use crate::update::Update;

/// Advance `state` to the sequence described by `diff` and `new_len`.
///
/// `diff` must be sorted by index with no duplicates, as produced by
/// compaction. Positions past the old length must be contiguous
/// placements starting at the (possibly truncated) end of `state`.
/// Tombstones are skipped.
pub fn apply_diff<V: Clone>(state: &mut Vec<V>, diff: &[Update<V>], new_len: usize) {
    if new_len < state.len() {
        state.truncate(new_len);
    }

    for update in diff {
        let Some(value) = &update.after else {
            debug_assert!(update.index >= new_len, "tombstone below the new length");
            continue;
        };

        if update.index < state.len() {
            state[update.index] = value.clone();
        } else {
            debug_assert_eq!(
                update.index,
                state.len(),
                "placement is not contiguous with the tail"
            );
            state.push(value.clone());
        }
    }

    debug_assert_eq!(state.len(), new_len, "diff does not reach the new length");
}
