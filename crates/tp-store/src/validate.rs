//! Snapshot validation: the invariant pass run before a reconciled
//! snapshot is allowed to replace the store.

use std::collections::HashSet;

use tp_core::Id;

use crate::connection::Connection;
use crate::error::{StoreError, StoreResult};
use crate::node::{NodeEntity, Recipient, Supplier};

/// Check a candidate snapshot against the data-model invariants:
///
/// - completeness: exactly one connection per (supplier, recipient) pair,
///   no connection referencing an absent node
/// - name uniqueness per role (case-insensitive)
/// - sort order of the connection collection
/// - cost mirrors consistent with their endpoint nodes
/// - no duplicate ids within a collection
/// - non-negative flow on every connection
///
/// A connection's `priority` is deliberately not checked: it is seeded
/// from the endpoints but independently editable afterward, so it only
/// has to match at the moment an endpoint last changed.
pub fn check_snapshot(
    suppliers: &[Supplier],
    recipients: &[Recipient],
    connections: &[Connection],
) -> StoreResult<()> {
    check_role(suppliers)?;
    check_role(recipients)?;

    let supplier_ids: HashSet<Id> = suppliers.iter().map(|s| s.id()).collect();
    let recipient_ids: HashSet<Id> = recipients.iter().map(|r| r.id()).collect();

    let mut connection_ids = HashSet::new();
    let mut pairs = HashSet::new();
    for conn in connections {
        if !connection_ids.insert(conn.id) {
            return Err(invariant(format!("duplicate connection id {}", conn.id)));
        }
        if !supplier_ids.contains(&conn.supplier) {
            return Err(invariant(format!(
                "connection {} references absent supplier {}",
                conn.id, conn.supplier
            )));
        }
        if !recipient_ids.contains(&conn.recipient) {
            return Err(invariant(format!(
                "connection {} references absent recipient {}",
                conn.id, conn.recipient
            )));
        }
        if !pairs.insert((conn.supplier, conn.recipient)) {
            return Err(invariant(format!(
                "pair ({}, {}) connected more than once",
                conn.supplier, conn.recipient
            )));
        }
        // Negated comparison so NaN fails too.
        if !(conn.attributes.units >= 0.0) {
            return Err(invariant(format!(
                "connection {} carries negative units {}",
                conn.id, conn.attributes.units
            )));
        }
    }
    if connections.len() != suppliers.len() * recipients.len() {
        return Err(invariant(format!(
            "expected {} connections for {}x{} nodes, found {}",
            suppliers.len() * recipients.len(),
            suppliers.len(),
            recipients.len(),
            connections.len()
        )));
    }

    check_order(suppliers, recipients, connections)?;
    check_mirrors(suppliers, recipients, connections)?;
    Ok(())
}

fn check_role<T: NodeEntity>(entries: &[T]) -> StoreResult<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in entries {
        if !ids.insert(entry.id()) {
            return Err(invariant(format!("duplicate {} id {}", T::ROLE, entry.id())));
        }
        if !names.insert(entry.name().to_lowercase()) {
            return Err(invariant(format!(
                "duplicate {} name {:?}",
                T::ROLE,
                entry.name()
            )));
        }
    }
    Ok(())
}

fn check_order(
    suppliers: &[Supplier],
    recipients: &[Recipient],
    connections: &[Connection],
) -> StoreResult<()> {
    let key = |conn: &Connection| -> String {
        let s = suppliers
            .iter()
            .find(|s| s.id() == conn.supplier)
            .map(NodeEntity::name)
            .unwrap_or("");
        let r = recipients
            .iter()
            .find(|r| r.id() == conn.recipient)
            .map(NodeEntity::name)
            .unwrap_or("");
        format!("{s}{r}").to_lowercase()
    };
    for window in connections.windows(2) {
        if key(&window[0]) > key(&window[1]) {
            return Err(invariant(format!(
                "connections out of order at id {}",
                window[1].id
            )));
        }
    }
    Ok(())
}

fn check_mirrors(
    suppliers: &[Supplier],
    recipients: &[Recipient],
    connections: &[Connection],
) -> StoreResult<()> {
    for conn in connections {
        let supplier_cost = suppliers
            .iter()
            .find(|s| s.id() == conn.supplier)
            .and_then(|s| s.purchase_cost);
        if supplier_cost.is_some() && conn.attributes.unit_purchase_cost != supplier_cost {
            return Err(invariant(format!(
                "connection {} purchase-cost mirror out of date",
                conn.id
            )));
        }
        let recipient_profit = recipients
            .iter()
            .find(|r| r.id() == conn.recipient)
            .and_then(|r| r.sale_profit);
        if recipient_profit.is_some() && conn.attributes.unit_sale_profit != recipient_profit {
            return Err(invariant(format!(
                "connection {} sale-profit mirror out of date",
                conn.id
            )));
        }
    }
    Ok(())
}

fn invariant(what: String) -> StoreError {
    StoreError::Invariant { what }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{ConnectionAttributes, Readiness};

    fn named_supplier(idx: u32, name: &str) -> Supplier {
        let mut s = Supplier::new(name, 50.0);
        s.set_id(Id::from_index(idx));
        s
    }

    fn named_recipient(idx: u32, name: &str) -> Recipient {
        let mut r = Recipient::new(name, 50.0);
        r.set_id(Id::from_index(idx));
        r
    }

    fn conn(idx: u32, supplier: u32, recipient: u32) -> Connection {
        Connection {
            id: Id::from_index(idx),
            supplier: Id::from_index(supplier),
            recipient: Id::from_index(recipient),
            attributes: ConnectionAttributes::default(),
            readiness: Readiness::Unpriced,
        }
    }

    #[test]
    fn accepts_complete_sorted_snapshot() {
        let suppliers = vec![named_supplier(0, "A"), named_supplier(1, "B")];
        let recipients = vec![named_recipient(0, "R1")];
        let connections = vec![conn(0, 0, 0), conn(1, 1, 0)];
        assert!(check_snapshot(&suppliers, &recipients, &connections).is_ok());
    }

    #[test]
    fn rejects_missing_pair() {
        let suppliers = vec![named_supplier(0, "A"), named_supplier(1, "B")];
        let recipients = vec![named_recipient(0, "R1")];
        let connections = vec![conn(0, 0, 0)];
        assert!(check_snapshot(&suppliers, &recipients, &connections).is_err());
    }

    #[test]
    fn rejects_dangling_endpoint() {
        let suppliers = vec![named_supplier(0, "A")];
        let recipients = vec![named_recipient(0, "R1")];
        let connections = vec![conn(0, 7, 0)];
        assert!(check_snapshot(&suppliers, &recipients, &connections).is_err());
    }

    #[test]
    fn rejects_case_insensitive_name_clash() {
        let suppliers = vec![named_supplier(0, "a"), named_supplier(1, "A")];
        let recipients = vec![named_recipient(0, "R1")];
        let connections = vec![conn(0, 0, 0), conn(1, 1, 0)];
        assert!(check_snapshot(&suppliers, &recipients, &connections).is_err());
    }

    #[test]
    fn rejects_unsorted_connections() {
        let suppliers = vec![named_supplier(0, "A"), named_supplier(1, "B")];
        let recipients = vec![named_recipient(0, "R1")];
        let connections = vec![conn(0, 1, 0), conn(1, 0, 0)];
        assert!(check_snapshot(&suppliers, &recipients, &connections).is_err());
    }

    #[test]
    fn rejects_negative_units() {
        let suppliers = vec![named_supplier(0, "A")];
        let recipients = vec![named_recipient(0, "R1")];
        let mut c = conn(0, 0, 0);
        c.attributes.units = -7.0;
        assert!(check_snapshot(&suppliers, &recipients, &[c.clone()]).is_err());

        c.attributes.units = f64::NAN;
        assert!(check_snapshot(&suppliers, &recipients, &[c]).is_err());
    }

    #[test]
    fn rejects_stale_cost_mirror() {
        let mut supplier = named_supplier(0, "A");
        supplier.purchase_cost = Some(5.0);
        let recipients = vec![named_recipient(0, "R1")];
        let mut c = conn(0, 0, 0);
        c.attributes.unit_purchase_cost = Some(4.0);
        assert!(check_snapshot(&[supplier], &recipients, &[c]).is_err());
    }
}
