//! Merging a solver response back into the authoritative store.

use tracing::warn;
use tp_core::Id;
use tp_store::{
    Connection, ConnectionAttributes, NodeEntity, Readiness, Recipient, Store, Supplier,
};

use crate::error::{SolveError, SolveResult};
use crate::request::{ConnectionRecord, SolveVariant};

/// Rewrite the store from a solver response.
///
/// Locally authoritative fields win over the solver's copies: purchase
/// cost and sale profit are re-read from the live registries by endpoint
/// id, and a transport cost the solver omitted falls back to the value
/// already recorded for that connection. The supplier and recipient
/// collections are rebuilt by projecting unique endpoints out of the
/// reconciled connection list (dedup by id, first record wins, sorted by
/// name).
///
/// The replacement is all-or-nothing: the candidate snapshot is validated
/// against the store invariants first, and on any failure (including an
/// empty response) the prior snapshot stays authoritative.
pub fn apply_result(
    store: &mut Store,
    records: &[ConnectionRecord],
    variant: SolveVariant,
) -> SolveResult<()> {
    if records.is_empty() {
        warn!("empty solver response; keeping previous snapshot");
        return Err(SolveError::MalformedResponse {
            what: "empty connection list".to_string(),
        });
    }

    let resolved_state = match variant {
        SolveVariant::Standard => Readiness::ResolvedStandard,
        SolveVariant::Mediator => Readiness::ResolvedMediator,
    };

    let mut suppliers: Vec<Supplier> = Vec::new();
    let mut recipients: Vec<Recipient> = Vec::new();
    let mut connections: Vec<Connection> = Vec::with_capacity(records.len());

    for record in records {
        let conn_id = checked_id(record.id, "connection")?;
        let supplier_id = checked_id(record.supplier.id, "supplier")?;
        let recipient_id = checked_id(record.recipient.id, "recipient")?;
        if record.attributes.units < 0.0 {
            warn!(id = record.id, units = record.attributes.units, "negative units in response");
            return Err(SolveError::MalformedResponse {
                what: format!(
                    "connection {} resolved to negative units {}",
                    record.id, record.attributes.units
                ),
            });
        }

        // Live registries are authoritative for cost fields; the solver's
        // copies only count for endpoints the store has never seen.
        let mut supplier = record.supplier.to_supplier();
        if let Some(live) = store.supplier(supplier_id) {
            supplier.purchase_cost = live.purchase_cost;
        }
        let mut recipient = record.recipient.to_recipient();
        if let Some(live) = store.recipient(recipient_id) {
            recipient.sale_profit = live.sale_profit;
        }

        let transport_cost = record.attributes.transport_cost.or_else(|| {
            store
                .connection(conn_id)
                .and_then(|c| c.attributes.unit_transport_cost)
        });

        let mut readiness = store
            .connection(conn_id)
            .map(|c| c.readiness)
            .unwrap_or(Readiness::Unpriced);
        readiness.advance_to(resolved_state);

        connections.push(Connection {
            id: conn_id,
            supplier: supplier_id,
            recipient: recipient_id,
            attributes: ConnectionAttributes {
                units: record.attributes.units,
                limit: record.attributes.limit,
                priority: record.attributes.priority,
                unit_transport_cost: transport_cost,
                unit_purchase_cost: supplier.purchase_cost,
                unit_sale_profit: recipient.sale_profit,
            },
            readiness,
        });

        if !suppliers.iter().any(|s| s.id() == supplier_id) {
            suppliers.push(supplier);
        }
        if !recipients.iter().any(|r| r.id() == recipient_id) {
            recipients.push(recipient);
        }
    }

    suppliers.sort_by_key(|s| s.name().to_lowercase());
    recipients.sort_by_key(|r| r.name().to_lowercase());
    connections.sort_by_key(|c| {
        let s = suppliers
            .iter()
            .find(|s| s.id() == c.supplier)
            .map(NodeEntity::name)
            .unwrap_or("");
        let r = recipients
            .iter()
            .find(|r| r.id() == c.recipient)
            .map(NodeEntity::name)
            .unwrap_or("");
        format!("{s}{r}").to_lowercase()
    });

    store
        .replace_snapshot(suppliers, recipients, connections)
        .map_err(|e| {
            warn!(error = %e, "reconciled snapshot rejected; keeping previous snapshot");
            SolveError::Store(e)
        })
}

/// Convert a wire id, rejecting values the id space cannot represent.
/// The response parses fine with such ids, so they have to be caught here
/// before any record is adopted.
fn checked_id(wire_id: u32, what: &str) -> SolveResult<Id> {
    Id::try_from_index(wire_id).ok_or_else(|| {
        warn!(id = wire_id, what, "out-of-range id in solver response");
        SolveError::MalformedResponse {
            what: format!("{what} id {wire_id} out of range"),
        }
    })
}
