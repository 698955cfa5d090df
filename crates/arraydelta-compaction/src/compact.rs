//! In-place diff compaction.
//!
//! A raw batch holds every update observed during one change window, in
//! arrival order and possibly several per index. Compaction rewrites it
//! into the minimal equivalent batch:
//!
//! ```text
//! stable sort by index
//! for each run of updates sharing an index:
//!     merged = (first.before, last.after)
//!     if merged is absent on both sides: stop, drop it and everything above
//!     if merged is a no-op:              drop it
//!     else:                              keep it
//! if the scan ran to the end and the last kept record ends absent: drop it
//! truncate to the kept records
//! ```
//!
//! The early stop relies on the owning sequence only growing and shrinking
//! at its tail: an index created and removed within the window can only be
//! followed by higher indices that were created and removed too.
//!
//! Removals of indices that existed before the window are kept, except for
//! the highest one when the scan reaches the end of the batch; the consumer
//! learns about that one from the sequence's new length.

use arraydelta_core::Update;

/// Reduce `batch` to its minimal equivalent form.
///
/// On return `batch` is sorted by strictly ascending index, holds no
/// no-ops and no transients, and its length equals the number of
/// surviving updates. Any surviving removals sit at the highest indices.
/// An empty batch is left unchanged.
///
/// The batch must obey the tail-anchored invariant and each index's
/// updates must chain (`before` of one equals `after` of the previous).
/// Neither is checked here outside of debug assertions; see
/// [`crate::validate`] for explicit checks.
pub fn compact<V: PartialEq>(batch: &mut Vec<Update<V>>) {
    if batch.is_empty() {
        return;
    }

    // Stable: updates to the same index keep their arrival order
    batch.sort_by_key(|update| update.index);

    let kept = merge_sorted(batch);
    batch.truncate(kept);
}

/// Merge an index-sorted batch in place.
///
/// Returns the number of surviving records, which are left at the front
/// of `batch`. Whatever follows them is consumed and must be discarded.
pub(crate) fn merge_sorted<V: PartialEq>(batch: &mut [Update<V>]) -> usize {
    let len = batch.len();
    let mut write = 0;
    let mut read = 0;

    while read < len {
        // The write slot is either fresh or holds a discarded no-op
        batch.swap(write, read);
        let index = batch[write].index;
        read += 1;

        while read < len && batch[read].index == index {
            let after = batch[read].after.take();
            batch[write].after = after;
            read += 1;
        }

        if batch[write].is_transient() {
            debug_assert!(
                crate::validate::ends_absent(&batch[read..]),
                "index {index} was transient but a higher index survives"
            );
            return write;
        }

        if !batch[write].is_noop() {
            write += 1;
        }
    }

    // Full scan: the highest removal is implied by the new length
    if write > 0 && batch[write - 1].is_tombstone() {
        write -= 1;
    }

    write
}
