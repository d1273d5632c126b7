//! Field-merge helpers for edit forms.
//!
//! The dashboard's edit forms submit partially filled values: a blank
//! field means "keep the previous value". These patches encode that merge
//! policy so the UI layer does not have to. Note the policy cannot clear a
//! field back to unset; that matches the original forms.

use crate::node::{Recipient, Supplier};

/// Partial update for a supplier edit form.
#[derive(Debug, Clone, Default)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub supply: Option<f64>,
    pub available: Option<f64>,
    pub priority: Option<u32>,
    pub limit: Option<f64>,
    pub purchase_cost: Option<f64>,
}

impl SupplierPatch {
    /// Merge onto the previous entity. Unset fields fall back to the
    /// previous value; `available` is clamped to the (possibly updated)
    /// supply. The id is always preserved.
    pub fn apply(self, previous: &Supplier) -> Supplier {
        let supply = self.supply.unwrap_or(previous.supply);
        let available = self
            .available
            .or(previous.core.available)
            .map(|a| a.min(supply));
        Supplier {
            core: crate::node::NodeCore {
                id: previous.core.id,
                name: self.name.unwrap_or_else(|| previous.core.name.clone()),
                available,
                priority: self.priority.or(previous.core.priority),
                limit: self.limit.or(previous.core.limit),
            },
            supply,
            purchase_cost: self.purchase_cost.or(previous.purchase_cost),
        }
    }
}

/// Partial update for a recipient edit form.
#[derive(Debug, Clone, Default)]
pub struct RecipientPatch {
    pub name: Option<String>,
    pub demand: Option<f64>,
    pub available: Option<f64>,
    pub priority: Option<u32>,
    pub limit: Option<f64>,
    pub sale_profit: Option<f64>,
}

impl RecipientPatch {
    /// Merge onto the previous entity; `available` is clamped to the
    /// (possibly updated) demand.
    pub fn apply(self, previous: &Recipient) -> Recipient {
        let demand = self.demand.unwrap_or(previous.demand);
        let available = self
            .available
            .or(previous.core.available)
            .map(|a| a.min(demand));
        Recipient {
            core: crate::node::NodeCore {
                id: previous.core.id,
                name: self.name.unwrap_or_else(|| previous.core.name.clone()),
                available,
                priority: self.priority.or(previous.core.priority),
                limit: self.limit.or(previous.core.limit),
            },
            demand,
            sale_profit: self.sale_profit.or(previous.sale_profit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_keep_previous_values() {
        let previous = Supplier::new("A", 90.0).with_priority(2).with_limit(10.0);
        let patch = SupplierPatch {
            purchase_cost: Some(5.0),
            ..Default::default()
        };
        let merged = patch.apply(&previous);
        assert_eq!(merged.core.name, "A");
        assert_eq!(merged.supply, 90.0);
        assert_eq!(merged.core.priority, Some(2));
        assert_eq!(merged.core.limit, Some(10.0));
        assert_eq!(merged.purchase_cost, Some(5.0));
    }

    #[test]
    fn available_is_clamped_to_new_supply() {
        let previous = Supplier::new("A", 90.0).with_available(80.0);
        let patch = SupplierPatch {
            supply: Some(50.0),
            ..Default::default()
        };
        assert_eq!(patch.apply(&previous).core.available, Some(50.0));

        let previous = Recipient::new("R1", 80.0);
        let patch = RecipientPatch {
            available: Some(200.0),
            ..Default::default()
        };
        assert_eq!(patch.apply(&previous).core.available, Some(80.0));
    }

    #[test]
    fn id_survives_merge() {
        use crate::node::NodeEntity;
        let mut previous = Recipient::new("R1", 80.0);
        previous.set_id(tp_core::Id::from_index(7));
        let merged = RecipientPatch::default().apply(&previous);
        assert_eq!(merged.id(), previous.id());
    }
}
