//! # Error Types
//!
//! Shared error type for validated constructors and string parsing in the
//! foundational types. Lifecycle, storage, and delivery errors live in the
//! crates that own those concerns.

use thiserror::Error;

/// Top-level error type for foundational FoodShare types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodshareError {
    /// A value failed a constructor invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A string could not be parsed into the requested type.
    #[error("parse error: {0}")]
    Parse(String),
}
