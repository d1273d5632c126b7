//! The store facade: the only mutation entry points.

use tp_core::{ConnectionId, RecipientId, SupplierId};

use crate::connection::{Connection, ConnectionAttributes};
use crate::error::StoreResult;
use crate::matrix::ConnectionMatrix;
use crate::node::{NodeEntity, Recipient, Supplier};
use crate::registry::Registry;
use crate::validate;

/// The authoritative in-memory store behind the dashboard.
///
/// Single-threaded and synchronous: each mutation runs to completion
/// before the next is accepted, so partial states are never observable.
/// Every method either leaves the store in a new consistent snapshot
/// (invariants I1-I5 of the data model hold) or returns an error with the
/// store untouched.
#[derive(Debug, Clone, Default)]
pub struct Store {
    suppliers: Registry<Supplier>,
    recipients: Registry<Recipient>,
    matrix: ConnectionMatrix,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // --- read access ---------------------------------------------------

    pub fn suppliers(&self) -> &[Supplier] {
        self.suppliers.as_slice()
    }

    pub fn recipients(&self) -> &[Recipient] {
        self.recipients.as_slice()
    }

    /// The full connection collection, sorted by the case-insensitive
    /// composite key `supplier.name + recipient.name`.
    pub fn connections(&self) -> &[Connection] {
        self.matrix.connections()
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    pub fn recipient(&self, id: RecipientId) -> Option<&Recipient> {
        self.recipients.get(id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.matrix.get(id)
    }

    // --- mutations -----------------------------------------------------

    /// Add a supplier, fabricating one unpriced connection to every
    /// recipient currently in the store.
    pub fn add_supplier(&mut self, candidate: Supplier) -> StoreResult<SupplierId> {
        let added = self.suppliers.add(candidate)?;
        self.matrix.on_supplier_added(added, self.recipients.iter());
        let id = added.id();
        self.matrix.resort(&self.suppliers, &self.recipients);
        Ok(id)
    }

    /// Add a recipient, fabricating one unpriced connection from every
    /// supplier currently in the store.
    pub fn add_recipient(&mut self, candidate: Recipient) -> StoreResult<RecipientId> {
        let added = self.recipients.add(candidate)?;
        self.matrix.on_recipient_added(added, self.suppliers.iter());
        let id = added.id();
        self.matrix.resort(&self.suppliers, &self.recipients);
        Ok(id)
    }

    /// Replace a supplier in place (looked up by id) and refresh the
    /// mirrored fields on every connection it touches.
    pub fn update_supplier(&mut self, supplier: Supplier) -> StoreResult<()> {
        let updated = self.suppliers.update(supplier)?;
        self.matrix.on_supplier_updated(updated, &self.recipients);
        // The name may have changed, which moves every touching row.
        self.matrix.resort(&self.suppliers, &self.recipients);
        Ok(())
    }

    /// Replace a recipient in place (looked up by id) and refresh the
    /// mirrored fields on every connection it touches.
    pub fn update_recipient(&mut self, recipient: Recipient) -> StoreResult<()> {
        let updated = self.recipients.update(recipient)?;
        self.matrix.on_recipient_updated(updated, &self.suppliers);
        self.matrix.resort(&self.suppliers, &self.recipients);
        Ok(())
    }

    /// Remove a supplier and cascade-delete every connection from it.
    /// Idempotent: removing an absent id is a no-op.
    pub fn remove_supplier(&mut self, id: SupplierId) -> bool {
        let removed = self.suppliers.remove(id);
        self.matrix.on_supplier_removed(id);
        removed
    }

    /// Remove a recipient and cascade-delete every connection to it.
    pub fn remove_recipient(&mut self, id: RecipientId) -> bool {
        let removed = self.recipients.remove(id);
        self.matrix.on_recipient_removed(id);
        removed
    }

    /// Point update of one connection's attributes.
    pub fn update_connection(
        &mut self,
        id: ConnectionId,
        attributes: ConnectionAttributes,
    ) -> StoreResult<()> {
        self.matrix.update_connection(id, attributes)?;
        Ok(())
    }

    /// Atomically replace the whole store with a reconciled snapshot.
    ///
    /// The candidate is validated against the data-model invariants before
    /// any field is touched; on any failure the previous snapshot stays
    /// authoritative. Identifier allocators are advanced past every adopted
    /// id, so ids can never be reassigned across a replacement.
    pub fn replace_snapshot(
        &mut self,
        suppliers: Vec<Supplier>,
        recipients: Vec<Recipient>,
        connections: Vec<Connection>,
    ) -> StoreResult<()> {
        validate::check_snapshot(&suppliers, &recipients, &connections)?;
        self.suppliers.replace_all(suppliers);
        self.recipients.replace_all(recipients);
        self.matrix.replace_all(connections);
        Ok(())
    }
}
