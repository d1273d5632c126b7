//! The supplier x recipient connection matrix.

use tracing::warn;
use tp_core::{ConnectionId, IdAlloc, RecipientId, SupplierId};

use crate::connection::{merged_priority, Connection, ConnectionAttributes, Readiness};
use crate::error::{StoreError, StoreResult};
use crate::node::{NodeEntity, Recipient, Supplier};
use crate::registry::Registry;

/// Owns the complete set of pairwise connections.
///
/// The matrix never acts on its own: connections are created and removed
/// only as a side effect of node mutations, or wholesale replaced after a
/// solve. The collection is kept sorted by the case-insensitive composite
/// key `supplier.name + recipient.name` (callers re-sort after any
/// operation that can change names or add rows).
#[derive(Debug, Clone, Default)]
pub struct ConnectionMatrix {
    connections: Vec<Connection>,
    alloc: IdAlloc,
}

impl ConnectionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Fabricate one connection from the new supplier to every recipient.
    pub fn on_supplier_added<'a>(
        &mut self,
        supplier: &Supplier,
        recipients: impl Iterator<Item = &'a Recipient>,
    ) {
        for recipient in recipients {
            self.push_pair(supplier, recipient);
        }
    }

    /// Fabricate one connection from every supplier to the new recipient.
    pub fn on_recipient_added<'a>(
        &mut self,
        recipient: &Recipient,
        suppliers: impl Iterator<Item = &'a Supplier>,
    ) {
        for supplier in suppliers {
            self.push_pair(supplier, recipient);
        }
    }

    fn push_pair(&mut self, supplier: &Supplier, recipient: &Recipient) {
        self.connections.push(Connection {
            id: self.alloc.allocate(),
            supplier: supplier.id(),
            recipient: recipient.id(),
            attributes: ConnectionAttributes::derived(supplier, recipient),
            readiness: Readiness::Unpriced,
        });
    }

    /// Cascade delete: drop every connection touching the removed supplier.
    /// Returns the number of connections removed.
    pub fn on_supplier_removed(&mut self, id: SupplierId) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| c.supplier != id);
        before - self.connections.len()
    }

    /// Cascade delete: drop every connection touching the removed recipient.
    pub fn on_recipient_removed(&mut self, id: RecipientId) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| c.recipient != id);
        before - self.connections.len()
    }

    /// Refresh mirrored fields on every connection from this supplier.
    ///
    /// Priority is recomputed from both endpoints' current values; the
    /// purchase-cost mirror follows the supplier. Units, transport cost and
    /// limit are preserved untouched.
    pub fn on_supplier_updated(&mut self, supplier: &Supplier, recipients: &Registry<Recipient>) {
        for conn in self
            .connections
            .iter_mut()
            .filter(|c| c.supplier == supplier.id())
        {
            let recipient_priority = recipients.get(conn.recipient).and_then(|r| r.core.priority);
            conn.attributes.priority = merged_priority(supplier.core.priority, recipient_priority);
            conn.attributes.unit_purchase_cost = supplier.purchase_cost;
        }
    }

    /// Refresh mirrored fields on every connection to this recipient.
    pub fn on_recipient_updated(&mut self, recipient: &Recipient, suppliers: &Registry<Supplier>) {
        for conn in self
            .connections
            .iter_mut()
            .filter(|c| c.recipient == recipient.id())
        {
            let supplier_priority = suppliers.get(conn.supplier).and_then(|s| s.core.priority);
            conn.attributes.priority = merged_priority(supplier_priority, recipient.core.priority);
            conn.attributes.unit_sale_profit = recipient.sale_profit;
        }
    }

    /// Point update: replace a connection's attributes in place.
    ///
    /// The row keeps its position (endpoint names are unchanged, so sort
    /// order is unaffected). Negative flow is clamped to zero, the same
    /// floor the edit surface applies. Setting a transport cost advances
    /// an unpriced connection to `Priced`.
    pub fn update_connection(
        &mut self,
        id: ConnectionId,
        attributes: ConnectionAttributes,
    ) -> StoreResult<&Connection> {
        let conn = self
            .connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                warn!(id = %id, "connection update target not found");
                StoreError::NotFound {
                    role: "connection",
                    id,
                }
            })?;
        conn.attributes = attributes;
        // f64::max also normalizes NaN to the floor.
        conn.attributes.units = conn.attributes.units.max(0.0);
        if conn.attributes.unit_transport_cost.is_some() {
            conn.readiness.advance_to(Readiness::Priced);
        }
        Ok(conn)
    }

    /// Stable sort by lower-cased `supplier.name + recipient.name`.
    ///
    /// Ties (which cannot occur between distinct pairs once names are
    /// unique per role) fall back to insertion order.
    pub fn resort(&mut self, suppliers: &Registry<Supplier>, recipients: &Registry<Recipient>) {
        self.connections.sort_by_key(|c| {
            let supplier = suppliers.get(c.supplier).map(NodeEntity::name).unwrap_or("");
            let recipient = recipients.get(c.recipient).map(NodeEntity::name).unwrap_or("");
            format!("{supplier}{recipient}").to_lowercase()
        });
    }

    /// Adopt a pre-validated, pre-sorted connection set (reconciliation).
    ///
    /// The allocator is advanced past every adopted id so later fabricated
    /// connections cannot reuse one.
    pub(crate) fn replace_all(&mut self, connections: Vec<Connection>) {
        for conn in &connections {
            self.alloc.ensure_above(conn.id);
        }
        self.connections = connections;
    }
}
