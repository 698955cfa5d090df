//! A tail-anchored sequence that records its own diff.
//!
//! The recorder keeps two copies of a sequence: the last state handed to
//! observers and the live state being mutated. Every mutation appends a raw
//! update to the pending batch. Committing compacts that batch and replays
//! it onto the observed copy, which must then match the live state.
//!
//! ```text
//! set(i, v)   -> change(i, old, v)
//! push(v)     -> placement(len, v)
//! pop()       -> removal(len - 1, old)
//! commit()    -> compact(pending); apply(observed, pending, len)
//! ```

use crate::compactor::Compactor;
use crate::error::{CompactionError, Result};
use arraydelta_core::{apply_diff, Update};

/// Sequence wrapper producing a raw update per mutation.
#[derive(Clone, Debug)]
pub struct DiffRecorder<V> {
    /// State as of the last commit
    observed: Vec<V>,
    /// Live state
    state: Vec<V>,
    /// Raw updates since the last commit, in arrival order
    pending: Vec<Update<V>>,
}

impl<V> Default for DiffRecorder<V> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            state: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<V: Clone + PartialEq> DiffRecorder<V> {
    pub fn new() -> Self {
        Self {
            observed: Vec::new(),
            state: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Start from `values` as an already observed state.
    pub fn from_values(values: Vec<V>) -> Self {
        Self {
            observed: values.clone(),
            state: values,
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.state.get(index)
    }

    /// Live state, including uncommitted changes.
    pub fn state(&self) -> &[V] {
        &self.state
    }

    /// State as of the last commit.
    pub fn observed(&self) -> &[V] {
        &self.observed
    }

    /// Raw updates recorded since the last commit.
    pub fn pending(&self) -> &[Update<V>] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Overwrite an existing position.
    pub fn set(&mut self, index: usize, value: V) -> Result<()> {
        let length = self.state.len();
        let slot = self
            .state
            .get_mut(index)
            .ok_or(CompactionError::IndexOutOfBounds { index, length })?;

        let old = std::mem::replace(slot, value.clone());
        self.pending.push(Update::change(index, old, value));
        Ok(())
    }

    /// Append a position at the tail.
    pub fn push(&mut self, value: V) {
        self.pending
            .push(Update::placement(self.state.len(), value.clone()));
        self.state.push(value);
    }

    /// Drop the last position.
    pub fn pop(&mut self) -> Option<V> {
        let value = self.state.pop()?;
        self.pending
            .push(Update::removal(self.state.len(), value.clone()));
        Some(value)
    }

    /// Drop positions from the tail until `len` remain.
    pub fn truncate(&mut self, len: usize) {
        while self.state.len() > len {
            self.pop();
        }
    }

    /// Compact the pending batch and make the live state the observed one.
    ///
    /// Returns the compacted diff. If the compactor rejects the batch the
    /// pending updates are kept (sorted) and nothing is committed.
    pub fn commit(&mut self, compactor: &mut Compactor) -> Result<Vec<Update<V>>> {
        let mut diff = std::mem::take(&mut self.pending);

        if let Err(err) = compactor.compact(&mut diff) {
            self.pending = diff;
            return Err(err);
        }

        apply_diff(&mut self.observed, &diff, self.state.len());
        debug_assert!(self.observed == self.state, "compacted diff diverged");

        Ok(diff)
    }

    /// Discard pending changes and return to the observed state.
    pub fn revert(&mut self) {
        self.pending.clear();
        self.state.clone_from(&self.observed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compactor::CompactionConfig;

    fn compactor() -> Compactor {
        Compactor::with_config(CompactionConfig {
            verify_lineage: true,
            verify_tail_anchored: true,
            shrink_to_fit: false,
        })
    }

    #[test]
    fn test_records_mutations() {
        let mut rec = DiffRecorder::from_values(vec![1, 2]);
        rec.set(0, 5).unwrap();
        rec.push(3);
        assert_eq!(rec.pop(), Some(3));

        assert_eq!(
            rec.pending(),
            &[
                Update::change(0, 1, 5),
                Update::placement(2, 3),
                Update::removal(2, 3),
            ]
        );
        assert_eq!(rec.state(), &[5, 2]);
        assert_eq!(rec.observed(), &[1, 2]);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut rec = DiffRecorder::from_values(vec![1]);
        assert_eq!(
            rec.set(1, 9),
            Err(CompactionError::IndexOutOfBounds { index: 1, length: 1 })
        );
        assert!(!rec.has_pending());
    }

    #[test]
    fn test_pop_empty() {
        let mut rec: DiffRecorder<i32> = DiffRecorder::new();
        assert_eq!(rec.pop(), None);
        assert!(!rec.has_pending());
        assert!(rec.is_empty());
    }

    #[test]
    fn test_commit_growth() {
        let mut compactor = compactor();
        let mut rec = DiffRecorder::new();
        rec.push(1);
        rec.push(2);
        rec.set(0, 7).unwrap();

        let diff = rec.commit(&mut compactor).unwrap();
        assert_eq!(
            diff,
            vec![Update::new(0, None, Some(7)), Update::placement(1, 2)]
        );
        assert_eq!(rec.observed(), &[7, 2]);
        assert!(!rec.has_pending());
    }

    #[test]
    fn test_commit_shrink() {
        let mut compactor = compactor();
        let mut rec = DiffRecorder::from_values(vec![1, 2, 3, 4]);
        rec.truncate(1);
        rec.set(0, 0).unwrap();

        // The highest removal is left to the new length
        let diff = rec.commit(&mut compactor).unwrap();
        assert_eq!(
            diff,
            vec![
                Update::change(0, 1, 0),
                Update::removal(1, 2),
                Update::removal(2, 3),
            ]
        );
        assert_eq!(rec.observed(), &[0]);
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn test_commit_transient_growth() {
        let mut compactor = compactor();
        let mut rec = DiffRecorder::from_values(vec![1]);
        rec.push(2);
        rec.push(3);
        rec.truncate(1);

        let diff = rec.commit(&mut compactor).unwrap();
        assert!(diff.is_empty());
        assert_eq!(rec.observed(), &[1]);
    }

    #[test]
    fn test_commit_shrink_and_regrow() {
        let mut compactor = compactor();
        let mut rec = DiffRecorder::from_values(vec![1, 2, 3]);
        rec.truncate(0);
        rec.push(1);
        rec.push(9);

        let diff = rec.commit(&mut compactor).unwrap();
        assert_eq!(diff, vec![Update::change(1, 2, 9)]);
        assert_eq!(rec.observed(), &[1, 9]);
    }

    #[test]
    fn test_default_without_value_default() {
        #[derive(Clone, Debug, PartialEq)]
        struct Handle(u32);

        let mut rec = DiffRecorder::<Handle>::default();
        assert!(rec.is_empty());
        rec.push(Handle(4));
        assert_eq!(rec.pending(), &[Update::placement(0, Handle(4))]);
    }

    #[test]
    fn test_revert() {
        let mut rec = DiffRecorder::from_values(vec![1, 2]);
        rec.set(1, 5).unwrap();
        rec.push(6);

        rec.revert();
        assert_eq!(rec.state(), &[1, 2]);
        assert!(!rec.has_pending());
    }
}
