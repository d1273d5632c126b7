//! Node types: suppliers and recipients.
//!
//! Both roles share a common record of fields ([`NodeCore`]) composed into
//! each role-specific struct; there is no inheritance and no dynamic
//! dispatch. The [`NodeEntity`] trait is the small seam the generic
//! registry needs: id, name, role label.

use tp_core::Id;

/// Fields common to both node roles.
///
/// `available`, `priority` and `limit` are genuinely optional: an explicit
/// zero is distinct from "unset". Where a default is needed (`available`),
/// it is derived through an accessor rather than written into the field.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCore {
    /// Assigned by the owning registry on add; stable for the entity's
    /// whole lifetime, never reassigned to another entity.
    pub id: Id,
    pub name: String,
    /// Quantity currently on hand (supplier) / currently wanted (recipient).
    pub available: Option<f64>,
    /// Ranking hint; larger wins when deriving a connection's priority.
    pub priority: Option<u32>,
    /// Per-node cap on total flow.
    pub limit: Option<f64>,
}

impl NodeCore {
    fn new(name: impl Into<String>) -> Self {
        Self {
            // Placeholder until a registry assigns the real id.
            id: Id::from_index(0),
            name: name.into(),
            available: None,
            priority: None,
            limit: None,
        }
    }
}

/// Uniform registry access for both node roles.
pub trait NodeEntity {
    /// Role label used in diagnostics ("supplier" / "recipient").
    const ROLE: &'static str;

    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);
    fn name(&self) -> &str;
}

/// A source node offering up to `supply` units.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub core: NodeCore,
    /// Max units offerable.
    pub supply: f64,
    /// Unit acquisition cost; authoritative for the mirrored
    /// `unit_purchase_cost` on every touching connection.
    pub purchase_cost: Option<f64>,
}

impl Supplier {
    pub fn new(name: impl Into<String>, supply: f64) -> Self {
        Self {
            core: NodeCore::new(name),
            supply,
            purchase_cost: None,
        }
    }

    pub fn with_available(mut self, available: f64) -> Self {
        self.core.available = Some(available);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.core.priority = Some(priority);
        self
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.core.limit = Some(limit);
        self
    }

    pub fn with_purchase_cost(mut self, cost: f64) -> Self {
        self.purchase_cost = Some(cost);
        self
    }

    /// Quantity on hand; defaults to the full supply when unset.
    pub fn available(&self) -> f64 {
        self.core.available.unwrap_or(self.supply)
    }
}

impl NodeEntity for Supplier {
    const ROLE: &'static str = "supplier";

    fn id(&self) -> Id {
        self.core.id
    }

    fn set_id(&mut self, id: Id) {
        self.core.id = id;
    }

    fn name(&self) -> &str {
        &self.core.name
    }
}

/// A sink node wanting up to `demand` units.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub core: NodeCore,
    /// Max units wanted.
    pub demand: f64,
    /// Unit resale revenue; authoritative for the mirrored
    /// `unit_sale_profit` on every touching connection.
    pub sale_profit: Option<f64>,
}

impl Recipient {
    pub fn new(name: impl Into<String>, demand: f64) -> Self {
        Self {
            core: NodeCore::new(name),
            demand,
            sale_profit: None,
        }
    }

    pub fn with_available(mut self, available: f64) -> Self {
        self.core.available = Some(available);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.core.priority = Some(priority);
        self
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.core.limit = Some(limit);
        self
    }

    pub fn with_sale_profit(mut self, profit: f64) -> Self {
        self.sale_profit = Some(profit);
        self
    }

    /// Quantity already received; defaults to 0 when unset.
    pub fn available(&self) -> f64 {
        self.core.available.unwrap_or(0.0)
    }
}

impl NodeEntity for Recipient {
    const ROLE: &'static str = "recipient";

    fn id(&self) -> Id {
        self.core.id
    }

    fn set_id(&mut self, id: Id) {
        self.core.id = id;
    }

    fn name(&self) -> &str {
        &self.core.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_available_defaults_to_supply() {
        let s = Supplier::new("A", 90.0);
        assert_eq!(s.available(), 90.0);
        let s = Supplier::new("D", 20.0).with_available(15.0);
        assert_eq!(s.available(), 15.0);
    }

    #[test]
    fn recipient_available_defaults_to_zero() {
        let r = Recipient::new("R1", 80.0);
        assert_eq!(r.available(), 0.0);
    }

    #[test]
    fn explicit_zero_priority_is_not_unset() {
        let s = Supplier::new("A", 10.0).with_priority(0);
        assert_eq!(s.core.priority, Some(0));
        assert_ne!(s.core.priority, None);
    }
}
