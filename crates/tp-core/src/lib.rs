//! tp-core: stable foundation for transplan.
//!
//! Contains:
//! - ids (compact stable IDs for store entities + per-kind monotonic allocators)

pub mod ids;

pub use ids::*;
