//! # arraydelta-product
//!
//! Enumerates every combination of several ordered index sets, used to
//! materialize coordinate tuples over multiple dimensions.
//!
//! Tuples come out in mixed-radix (odometer) order: the last set varies
//! fastest and the first set slowest.
//!
//! ```rust
//! use arraydelta_product::cartesian_product;
//!
//! let tuples = cartesian_product(&[vec![1, 2], vec![10, 20]]);
//! assert_eq!(tuples, vec![vec![1, 10], vec![1, 20], vec![2, 10], vec![2, 20]]);
//! ```

mod error;
mod product;

pub use error::{ProductError, Result};
pub use product::{cartesian_product, product_len, try_cartesian_product, CartesianProduct};
