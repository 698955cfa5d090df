//! Error types for product enumeration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product of {sets} set sizes overflows usize")]
    Overflow { sets: usize },
}

pub type Result<T> = std::result::Result<T, ProductError>;
