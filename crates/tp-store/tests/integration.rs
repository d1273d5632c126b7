//! Integration tests for tp-store.

use tp_store::{NodeEntity, Recipient, Store, StoreError, Supplier};

fn pair_names(store: &Store) -> Vec<(String, String)> {
    store
        .connections()
        .iter()
        .map(|c| {
            (
                store.supplier(c.supplier).unwrap().name().to_string(),
                store.recipient(c.recipient).unwrap().name().to_string(),
            )
        })
        .collect()
}

#[test]
fn worked_example_scenario() {
    let mut store = Store::new();
    store.add_supplier(Supplier::new("A", 90.0)).unwrap();
    store.add_supplier(Supplier::new("B", 55.0)).unwrap();
    store.add_recipient(Recipient::new("R1", 80.0)).unwrap();

    assert_eq!(
        pair_names(&store),
        vec![
            ("A".to_string(), "R1".to_string()),
            ("B".to_string(), "R1".to_string()),
        ]
    );
    assert!(store.connections().iter().all(|c| c.attributes.units == 0.0));

    // Add R0: re-sorted so every A-row precedes every B-row, R0 before R1.
    store.add_recipient(Recipient::new("R0", 30.0)).unwrap();
    assert_eq!(
        pair_names(&store),
        vec![
            ("A".to_string(), "R0".to_string()),
            ("A".to_string(), "R1".to_string()),
            ("B".to_string(), "R0".to_string()),
            ("B".to_string(), "R1".to_string()),
        ]
    );

    // Remove supplier A: connections shrink to B's rows only.
    let a = store.suppliers()[0].id();
    assert!(store.remove_supplier(a));
    assert_eq!(
        pair_names(&store),
        vec![
            ("B".to_string(), "R0".to_string()),
            ("B".to_string(), "R1".to_string()),
        ]
    );
    assert_eq!(store.suppliers().len(), 1);
    assert_eq!(store.suppliers()[0].name(), "B");
}

#[test]
fn completeness_after_mixed_mutations() {
    let mut store = Store::new();
    for (name, supply) in [("A", 90.0), ("B", 55.0), ("C", 30.0)] {
        store.add_supplier(Supplier::new(name, supply)).unwrap();
    }
    for (name, demand) in [("R1", 80.0), ("R2", 90.0)] {
        store.add_recipient(Recipient::new(name, demand)).unwrap();
    }
    assert_eq!(store.connections().len(), 6);

    let c = store.suppliers()[2].id();
    store.remove_supplier(c);
    assert_eq!(store.connections().len(), 4);

    let mut seen = std::collections::HashSet::new();
    for conn in store.connections() {
        assert!(seen.insert((conn.supplier, conn.recipient)), "pair repeated");
        assert!(store.supplier(conn.supplier).is_some());
        assert!(store.recipient(conn.recipient).is_some());
    }
}

#[test]
fn duplicate_name_leaves_store_unchanged() {
    let mut store = Store::new();
    store.add_supplier(Supplier::new("a", 10.0)).unwrap();
    store.add_recipient(Recipient::new("R1", 5.0)).unwrap();

    let err = store.add_supplier(Supplier::new("A", 99.0)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateName { role: "supplier", .. }));
    assert_eq!(store.suppliers().len(), 1);
    assert_eq!(store.connections().len(), 1);
}

#[test]
fn removing_recipient_cascades_exactly_its_rows() {
    let mut store = Store::new();
    for name in ["A", "B", "C"] {
        store.add_supplier(Supplier::new(name, 10.0)).unwrap();
    }
    let r1 = store.add_recipient(Recipient::new("R1", 5.0)).unwrap();
    store.add_recipient(Recipient::new("R2", 5.0)).unwrap();
    assert_eq!(store.connections().len(), 6);

    assert!(store.remove_recipient(r1));
    assert_eq!(store.connections().len(), 3);
    assert_eq!(store.suppliers().len(), 3);
    assert!(store.connections().iter().all(|c| c.recipient != r1));

    // Idempotent second remove.
    assert!(!store.remove_recipient(r1));
    assert_eq!(store.connections().len(), 3);
}

#[test]
fn purchase_cost_update_mirrors_onto_own_rows_only() {
    let mut store = Store::new();
    let a = store.add_supplier(Supplier::new("A", 90.0)).unwrap();
    store.add_supplier(Supplier::new("B", 55.0)).unwrap();
    store.add_recipient(Recipient::new("R1", 80.0)).unwrap();
    store.add_recipient(Recipient::new("R2", 90.0)).unwrap();

    let mut updated = store.supplier(a).unwrap().clone();
    updated.purchase_cost = Some(5.0);
    store.update_supplier(updated).unwrap();

    for conn in store.connections() {
        if conn.supplier == a {
            assert_eq!(conn.attributes.unit_purchase_cost, Some(5.0));
        } else {
            assert_eq!(conn.attributes.unit_purchase_cost, None);
        }
    }
}

#[test]
fn endpoint_update_recomputes_priority_but_keeps_units() {
    let mut store = Store::new();
    let a = store.add_supplier(Supplier::new("A", 90.0)).unwrap();
    let r = store
        .add_recipient(Recipient::new("R1", 80.0).with_priority(1))
        .unwrap();

    // Give the single connection some user-entered state first.
    let conn = store.connections()[0].clone();
    let mut attrs = conn.attributes.clone();
    attrs.units = 12.0;
    attrs.unit_transport_cost = Some(4.0);
    store.update_connection(conn.id, attrs).unwrap();

    let mut updated = store.supplier(a).unwrap().clone();
    updated.core.priority = Some(3);
    store.update_supplier(updated).unwrap();

    let conn = store.connection(conn.id).unwrap();
    assert_eq!(conn.attributes.priority, Some(3));
    assert_eq!(conn.attributes.units, 12.0);
    assert_eq!(conn.attributes.unit_transport_cost, Some(4.0));
    assert_eq!(conn.recipient, r);
}

#[test]
fn rename_resorts_connections() {
    let mut store = Store::new();
    let a = store.add_supplier(Supplier::new("A", 90.0)).unwrap();
    store.add_supplier(Supplier::new("B", 55.0)).unwrap();
    store.add_recipient(Recipient::new("R1", 80.0)).unwrap();

    let mut renamed = store.supplier(a).unwrap().clone();
    renamed.core.name = "Z".to_string();
    store.update_supplier(renamed).unwrap();

    assert_eq!(
        pair_names(&store),
        vec![
            ("B".to_string(), "R1".to_string()),
            ("Z".to_string(), "R1".to_string()),
        ]
    );
}

#[test]
fn update_unknown_ids_fail_and_store_is_untouched() {
    let mut store = Store::new();
    store.add_supplier(Supplier::new("A", 90.0)).unwrap();
    let before = store.clone();

    let mut ghost = Supplier::new("ghost", 1.0);
    ghost.set_id(tp_core::Id::from_index(99));
    assert!(matches!(
        store.update_supplier(ghost),
        Err(StoreError::NotFound { .. })
    ));
    assert_eq!(store.suppliers(), before.suppliers());
    assert_eq!(store.connections(), before.connections());
}
