//! Mixed-radix cartesian product.
//!
//! The output is indexed by a counter `n` in `0..T` where `T` is the product
//! of all set sizes. Each set is one digit of the counter with radix equal
//! to its size, decoded right to left:
//!
//! ```text
//! for k in (0..N).rev():
//!     tuple[k] = sets[k][n % |sets[k]|]
//!     n        = n / |sets[k]|
//! ```
//!
//! Ascending counter order is exactly odometer order.

use crate::error::{ProductError, Result};
use std::iter::FusedIterator;

/// Number of tuples in the product of `sets`.
///
/// Returns `None` if the product does not fit in `usize`. No sets at all
/// yield an empty product, as does any empty set, however large the other
/// sets are.
pub fn product_len<T, S: AsRef<[T]>>(sets: &[S]) -> Option<usize> {
    if sets.is_empty() || sets.iter().any(|set| set.as_ref().is_empty()) {
        return Some(0);
    }
    sets.iter()
        .try_fold(1usize, |acc, set| acc.checked_mul(set.as_ref().len()))
}

/// Every tuple drawn from `sets`, last set varying fastest.
///
/// # Panics
///
/// Panics if the number of tuples overflows `usize`. Any product that fits
/// in memory is far below that bound.
pub fn cartesian_product<T: Clone, S: AsRef<[T]>>(sets: &[S]) -> Vec<Vec<T>> {
    match try_cartesian_product(sets) {
        Ok(tuples) => tuples,
        Err(err) => panic!("{err}"),
    }
}

/// Like [`cartesian_product`] but reports overflow instead of panicking.
pub fn try_cartesian_product<T: Clone, S: AsRef<[T]>>(sets: &[S]) -> Result<Vec<Vec<T>>> {
    Ok(CartesianProduct::new(sets)?.collect())
}

/// Lazy iterator over the tuples of a cartesian product.
#[derive(Clone, Debug)]
pub struct CartesianProduct<'a, T> {
    sets: Vec<&'a [T]>,
    /// Next counter value from the front
    front: usize,
    /// One past the last counter value from the back
    back: usize,
}

impl<'a, T: Clone> CartesianProduct<'a, T> {
    pub fn new<S: AsRef<[T]>>(sets: &'a [S]) -> Result<Self> {
        let total = product_len(sets).ok_or(ProductError::Overflow { sets: sets.len() })?;
        Ok(Self {
            sets: sets.iter().map(|set| set.as_ref()).collect(),
            front: 0,
            back: total,
        })
    }

    /// Decode counter value `n` into its tuple.
    fn tuple_at(&self, n: usize) -> Vec<T> {
        debug_assert!(n < self.back);
        let mut rest = n;
        let mut tuple: Vec<T> = self
            .sets
            .iter()
            .rev()
            .map(|set| {
                let digit = rest % set.len();
                rest /= set.len();
                set[digit].clone()
            })
            .collect();
        tuple.reverse();
        tuple
    }
}

impl<T: Clone> Iterator for CartesianProduct<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let tuple = self.tuple_at(self.front);
        self.front += 1;
        Some(tuple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T: Clone> DoubleEndedIterator for CartesianProduct<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.tuple_at(self.back))
    }
}

impl<T: Clone> ExactSizeIterator for CartesianProduct<'_, T> {}

impl<T: Clone> FusedIterator for CartesianProduct<'_, T> {}
