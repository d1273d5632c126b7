//! Store-specific error types.

use thiserror::Error;
use tp_core::Id;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by store mutations.
///
/// Any `Err` guarantees the store was left untouched; the last consistent
/// snapshot stays authoritative.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{role} named {name:?} already exists (names are case-insensitive)")]
    DuplicateName { role: &'static str, name: String },

    #[error("{role} with id {id} not found")]
    NotFound { role: &'static str, id: Id },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
