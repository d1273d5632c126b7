//! Connections and their attributes.

use tp_core::{ConnectionId, RecipientId, SupplierId};

use crate::node::{Recipient, Supplier};

/// How far along the pricing/solve pipeline a connection has moved.
///
/// Transitions only go forward: setting a transport cost moves
/// `Unpriced -> Priced`, a solve moves to the matching `Resolved` state.
/// Later edits to a node's cost fields refresh the mirrored attribute
/// values but never demote the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Readiness {
    /// No transport cost recorded yet.
    Unpriced,
    /// Transport cost set by the user.
    Priced,
    /// Units assigned by a standard solve.
    ResolvedStandard,
    /// Units plus cost/profit figures assigned by a mediator solve.
    ResolvedMediator,
}

impl Readiness {
    /// Move forward to `target` if it is further along; backward moves are
    /// ignored.
    pub fn advance_to(&mut self, target: Readiness) {
        if target > *self {
            *self = target;
        }
    }
}

/// Editable flow/cost attributes of one supplier-recipient pair.
///
/// `unit_purchase_cost` and `unit_sale_profit` are mirrors of the endpoint
/// nodes' cost fields, refreshed whenever an endpoint changes; the nodes
/// stay authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionAttributes {
    /// Assigned flow, >= 0.
    pub units: f64,
    /// Upper bound on flow; seeded from the endpoints' limits at creation,
    /// independently editable afterward.
    pub limit: Option<f64>,
    /// Seeded from the endpoints' priorities; recomputed when either
    /// endpoint changes.
    pub priority: Option<u32>,
    /// Authoritative once set by the user or the solver.
    pub unit_transport_cost: Option<f64>,
    pub unit_purchase_cost: Option<f64>,
    pub unit_sale_profit: Option<f64>,
}

impl Default for ConnectionAttributes {
    fn default() -> Self {
        Self {
            units: 0.0,
            limit: None,
            priority: None,
            unit_transport_cost: None,
            unit_purchase_cost: None,
            unit_sale_profit: None,
        }
    }
}

impl ConnectionAttributes {
    /// Initial attributes for a freshly fabricated connection.
    pub fn derived(supplier: &Supplier, recipient: &Recipient) -> Self {
        Self {
            units: 0.0,
            limit: merged_limit(supplier.core.limit, recipient.core.limit),
            priority: merged_priority(supplier.core.priority, recipient.core.priority),
            unit_transport_cost: None,
            unit_purchase_cost: supplier.purchase_cost,
            unit_sale_profit: recipient.sale_profit,
        }
    }
}

/// Max of two optional priorities, missing treated as 0 for comparison.
///
/// `None` only when both sides are `None`: an explicit zero survives,
/// unlike the `value || default` coercion this replaces.
pub(crate) fn merged_priority(supplier: Option<u32>, recipient: Option<u32>) -> Option<u32> {
    match (supplier, recipient) {
        (None, None) => None,
        (s, r) => Some(s.unwrap_or(0).max(r.unwrap_or(0))),
    }
}

/// Max of two optional limits, same unset semantics as [`merged_priority`].
pub(crate) fn merged_limit(supplier: Option<f64>, recipient: Option<f64>) -> Option<f64> {
    match (supplier, recipient) {
        (None, None) => None,
        (s, r) => Some(s.unwrap_or(0.0).max(r.unwrap_or(0.0))),
    }
}

/// The relationship between one supplier and one recipient.
///
/// Endpoints are held by id only; names and cost fields are looked up
/// through the owning registries.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub supplier: SupplierId,
    pub recipient: RecipientId,
    pub attributes: ConnectionAttributes,
    pub readiness: Readiness,
}
