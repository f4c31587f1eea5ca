//! Cross-cutting error types for the data model.
//!
//! Statistical degeneracy (empty sets, zero weight, missing quorum) is never
//! an error; those cases are sentinel return values in `nub-analytics`. The
//! errors here are data-shape problems that must surface before any statistic
//! is computed.

use thiserror::Error;

use crate::enums::EntityKind;

/// Errors raised while building or validating model records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A member of the wrong kind was appended to a collection.
    #[error("Type consistency error: expected {expected}, found {found}")]
    TypeConsistency {
        expected: EntityKind,
        found: EntityKind,
    },

    /// A post-hoc scan found members whose kind differs from the collection's.
    #[error("Type consistency error: members at {indices:?} are not {expected}")]
    InconsistentTypes {
        expected: EntityKind,
        indices: Vec<usize>,
    },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
