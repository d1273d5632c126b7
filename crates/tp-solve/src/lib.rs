//! Solver boundary for the transplan store.
//!
//! The solver itself is an opaque external collaborator; this crate owns
//! the shape that crosses the boundary and the reconciliation of its
//! response back into the authoritative store:
//!
//! - wire records mirroring the dashboard's JSON (endpoints inlined,
//!   camelCase field names)
//! - readiness predicates gating the standard and mediator solve variants
//! - response parsing
//! - the reconciler, which re-merges locally authoritative cost fields and
//!   atomically replaces the store with the resolved snapshot

pub mod error;
pub mod reconcile;
pub mod request;

pub use error::{SolveError, SolveResult};
pub use reconcile::apply_result;
pub use request::{
    AttributesRecord, ConnectionRecord, RecipientRecord, SolveVariant, SupplierRecord,
    build_request, check_ready, parse_response,
};
