//! Property-based tests for diff compaction
//!
//! Random workloads drive a tail-anchored sequence through sets, pushes and
//! pops. For every workload the compacted batch must:
//!  - replay onto the old state to give the new state
//!  - equal the diff between the two states computed directly
//!  - be strictly ascending with no no-ops, no transients and removals only
//!    past the new length
//!  - be unchanged by a second compaction, apart from a final removal

use arraydelta_compaction::validate::{check_lineage, check_tail_anchored};
use arraydelta_compaction::{compact, CompactionConfig, Compactor, DiffRecorder};
use arraydelta_core::{apply_diff, Update};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Set(usize, i8),
    Push(i8),
    Pop,
}

// Small value range so that writes frequently cancel out
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..16, 0i8..4).prop_map(|(i, v)| Op::Set(i, v)),
        2 => (0i8..4).prop_map(Op::Push),
        2 => Just(Op::Pop),
    ]
}

fn workload_strategy() -> impl Strategy<Value = (Vec<i8>, Vec<Op>)> {
    (
        prop::collection::vec(0i8..4, 0..10),
        prop::collection::vec(op_strategy(), 0..40),
    )
}

fn run(initial: Vec<i8>, ops: &[Op]) -> DiffRecorder<i8> {
    let mut rec = DiffRecorder::from_values(initial);
    for op in ops {
        match *op {
            Op::Set(i, v) => {
                if !rec.is_empty() {
                    let index = i % rec.len();
                    rec.set(index, v).unwrap();
                }
            }
            Op::Push(v) => rec.push(v),
            Op::Pop => {
                rec.pop();
            }
        }
    }
    rec
}

/// The compacted diff between two states, built directly.
///
/// Every differing index below the longer length appears. When nothing
/// in `pending` touched an index past both lengths the scan runs to the
/// end, and a trailing removal is left to the new length.
fn expected_diff(old: &[i8], new: &[i8], pending: &[Update<i8>]) -> Vec<Update<i8>> {
    let span = old.len().max(new.len());
    let mut diff: Vec<_> = (0..span)
        .map(|i| Update::new(i, old.get(i).copied(), new.get(i).copied()))
        .filter(|u| !u.is_noop())
        .collect();

    let transient = pending.iter().any(|u| u.index >= span);
    if !transient && diff.last().is_some_and(|u| u.is_tombstone()) {
        diff.pop();
    }
    diff
}

fn strict_compactor() -> Compactor {
    Compactor::with_config(CompactionConfig {
        verify_lineage: true,
        verify_tail_anchored: true,
        shrink_to_fit: false,
    })
}

proptest! {
    #[test]
    fn compacted_diff_replays_to_new_state((initial, ops) in workload_strategy()) {
        let rec = run(initial.clone(), &ops);
        let mut batch = rec.pending().to_vec();
        compact(&mut batch);

        let mut replayed = initial;
        apply_diff(&mut replayed, &batch, rec.len());
        prop_assert_eq!(replayed.as_slice(), rec.state());
    }

    #[test]
    fn compacted_diff_is_minimal((initial, ops) in workload_strategy()) {
        let rec = run(initial.clone(), &ops);
        let mut batch = rec.pending().to_vec();
        compact(&mut batch);

        prop_assert_eq!(batch, expected_diff(&initial, rec.state(), rec.pending()));
    }

    #[test]
    fn compacted_diff_is_ordered_and_clean((initial, ops) in workload_strategy()) {
        let rec = run(initial, &ops);
        let mut batch = rec.pending().to_vec();
        compact(&mut batch);

        for pair in batch.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
        for update in &batch {
            prop_assert!(!update.is_noop());
            prop_assert!(!update.is_transient());
            if update.is_tombstone() {
                prop_assert!(update.index >= rec.len());
            }
        }
    }

    #[test]
    fn compaction_is_idempotent((initial, ops) in workload_strategy()) {
        let rec = run(initial, &ops);
        let mut batch = rec.pending().to_vec();
        compact(&mut batch);

        // A compacted batch has no transient, so a second pass runs to the
        // end and drops a final removal if one survived the first
        let mut once = batch.clone();
        if once.last().is_some_and(|u| u.is_tombstone()) {
            once.pop();
        }
        compact(&mut batch);
        prop_assert_eq!(batch, once);
    }

    #[test]
    fn recorded_batches_satisfy_preconditions((initial, ops) in workload_strategy()) {
        let rec = run(initial, &ops);
        let mut batch = rec.pending().to_vec();
        batch.sort_by_key(|u| u.index);

        prop_assert!(check_lineage(&batch).is_ok());
        prop_assert!(check_tail_anchored(&batch).is_ok());
    }

    #[test]
    fn commit_matches_live_state((initial, ops) in workload_strategy()) {
        let mut compactor = strict_compactor();
        let mut rec = run(initial, &ops);
        let raw = rec.pending().len();

        let diff = rec.commit(&mut compactor).unwrap();
        prop_assert_eq!(rec.observed(), rec.state());
        prop_assert!(!rec.has_pending());
        prop_assert_eq!(compactor.stats().updates_in, raw as u64);
        prop_assert_eq!(compactor.stats().updates_out, diff.len() as u64);
    }

    #[test]
    fn noop_only_batches_vanish(
        entries in prop::collection::btree_map(0usize..32, (any::<i32>(), 1usize..4), 0..20)
    ) {
        // Repeated identity writes to one index must agree on the value
        let mut batch: Vec<_> = entries
            .into_iter()
            .flat_map(|(i, (v, repeats))| std::iter::repeat(Update::change(i, v, v)).take(repeats))
            .collect();
        compact(&mut batch);
        prop_assert!(batch.is_empty());
    }
}
