//! Error types for the solver boundary.

use thiserror::Error;
use tp_store::StoreError;

pub type SolveResult<T> = Result<T, SolveError>;

/// Errors raised while preparing a solve or reconciling its result.
///
/// Any `Err` guarantees the store was left untouched.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The readiness predicate for the requested variant failed.
    #[error("Not ready to solve: {what}")]
    NotReady { what: String },

    /// Empty, unparseable, or inconsistent solver payload.
    #[error("Malformed solver response: {what}")]
    MalformedResponse { what: String },

    /// The reconciled snapshot failed the store's invariant pass.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
