//! In-memory bipartite store for transport-distribution planning.
//!
//! The store owns two node collections (suppliers, recipients) and the
//! complete matrix of pairwise connections between them. Every mutation
//! goes through the [`Store`] facade, which keeps the matrix exactly in
//! sync with the registries: adding a node fabricates one connection per
//! counterpart, removing a node cascades, updating a node refreshes the
//! mirrored cost fields on every connection that touches it.
//!
//! Connections reference their endpoints by id only; names and costs are
//! always looked up through the owning registry, so an endpoint update can
//! never leave a stale embedded copy behind.

pub mod connection;
pub mod error;
pub mod matrix;
pub mod node;
pub mod patch;
pub mod registry;
pub mod store;
pub mod validate;

pub use connection::{Connection, ConnectionAttributes, Readiness};
pub use error::{StoreError, StoreResult};
pub use matrix::ConnectionMatrix;
pub use node::{NodeCore, NodeEntity, Recipient, Supplier};
pub use patch::{RecipientPatch, SupplierPatch};
pub use registry::Registry;
pub use store::Store;
