//! Update records - one observed mutation at one position of a sequence
//!
//! An update carries the value a position held before the mutation and
//! the value it holds afterwards. `None` on either side marks a position
//! that does not exist at that moment:
//!  - `before == None`: the position was created (placement)
//!  - `after == None`: the position was destroyed (removal)
//!
//! A batch of updates for one sequence is reduced to its net effect by the
//! compaction crate; the records themselves carry no ordering beyond their
//! `index`.

use serde::{Deserialize, Serialize};

/// A single (index, before, after) mutation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update<V> {
    /// Position within the sequence.
    pub index: usize,
    /// Value before this update, `None` if the position did not exist.
    pub before: Option<V>,
    /// Value after this update, `None` if the position no longer exists.
    pub after: Option<V>,
}

impl<V> Update<V> {
    pub fn new(index: usize, before: Option<V>, after: Option<V>) -> Self {
        Self {
            index,
            before,
            after,
        }
    }

    /// A position appended to the sequence with `value`.
    pub fn placement(index: usize, value: V) -> Self {
        Self::new(index, None, Some(value))
    }

    /// A position holding `old` that was dropped from the sequence.
    pub fn removal(index: usize, old: V) -> Self {
        Self::new(index, Some(old), None)
    }

    /// An existing position overwritten from `old` to `new`.
    pub fn change(index: usize, old: V, new: V) -> Self {
        Self::new(index, Some(old), Some(new))
    }

    /// The position does not exist once this update has taken effect.
    pub fn is_tombstone(&self) -> bool {
        self.after.is_none()
    }

    /// The position did not exist before this update.
    pub fn is_placement(&self) -> bool {
        self.before.is_none()
    }

    /// An existing position was dropped.
    pub fn is_removal(&self) -> bool {
        self.before.is_some() && self.after.is_none()
    }

    /// Neither side exists: created and destroyed without ever being observed.
    ///
    /// Only meaningful for a merged record; a raw update in this state is
    /// malformed.
    pub fn is_transient(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

impl<V: PartialEq> Update<V> {
    /// `before == after`, with two absences comparing equal.
    ///
    /// Comparison is exact. For floating point values this means `NaN` is
    /// never a no-op against itself; use `None` for absence, not `NaN`.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}
