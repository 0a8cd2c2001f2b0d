// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use thiserror::Error;
use tubekit_core::EntityKind;

/// Error types surfaced by commands, toggles and view composition.
///
/// Validation errors are always raised before any mutation is applied, so a
/// failed call leaves entities and edges exactly as they were. `Storage`
/// aborts the whole operation and carries the backend's own error text.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A referenced entity or edge does not exist.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// Malformed or rejected input, including self-referential subscription.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A uniqueness rule would be violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The acting principal is not allowed to touch this entity.
    #[error("principal is not authorized for this {0}")]
    Unauthorized(EntityKind),

    /// The backing store failed; nothing about the failed call is partially
    /// applied.
    #[error("storage operation failed: {0}")]
    Storage(String),
}

impl EngineError {
    /// Wrap a store error.
    pub(crate) fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// `InvalidArgument` for a required text field that is empty.
    pub(crate) fn empty_field(field: &str) -> Self {
        Self::InvalidArgument(format!("{field} must not be empty"))
    }
}
