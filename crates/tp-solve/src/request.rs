//! Wire records and request construction.
//!
//! The request payload is the full current connection list with supplier,
//! recipient and attributes inlined, serialized the way the dashboard
//! POSTed it (camelCase keys). The response comes back in the same shape.

use serde::{Deserialize, Serialize};
use tracing::warn;
use tp_core::Id;
use tp_store::{
    Connection, ConnectionAttributes, NodeEntity, Recipient, Store, StoreError, Supplier,
};

use crate::error::{SolveError, SolveResult};

/// Which solve the external system is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveVariant {
    /// Optimal flow from transport costs alone; purchase/sale ignored.
    Standard,
    /// Optimal flow plus intermediary profit; requires purchase/sale and
    /// transport cost on every connection.
    Mediator,
}

impl SolveVariant {
    /// Path segment of the solver endpoint this variant targets.
    pub fn path(self) -> &'static str {
        match self {
            SolveVariant::Standard => "standard",
            SolveVariant::Mediator => "mediator",
        }
    }
}

/// Supplier as it crosses the wire, endpoint costs inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRecord {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    pub supply: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<f64>,
}

impl SupplierRecord {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id().index(),
            name: supplier.name().to_string(),
            available: supplier.core.available,
            priority: supplier.core.priority,
            limit: supplier.core.limit,
            supply: supplier.supply,
            purchase_cost: supplier.purchase_cost,
        }
    }

    pub fn to_supplier(&self) -> Supplier {
        let mut supplier = Supplier::new(self.name.clone(), self.supply);
        supplier.set_id(Id::from_index(self.id));
        supplier.core.available = self.available;
        supplier.core.priority = self.priority;
        supplier.core.limit = self.limit;
        supplier.purchase_cost = self.purchase_cost;
        supplier
    }
}

/// Recipient as it crosses the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    pub demand: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_profit: Option<f64>,
}

impl RecipientRecord {
    pub fn from_recipient(recipient: &Recipient) -> Self {
        Self {
            id: recipient.id().index(),
            name: recipient.name().to_string(),
            available: recipient.core.available,
            priority: recipient.core.priority,
            limit: recipient.core.limit,
            demand: recipient.demand,
            sale_profit: recipient.sale_profit,
        }
    }

    pub fn to_recipient(&self) -> Recipient {
        let mut recipient = Recipient::new(self.name.clone(), self.demand);
        recipient.set_id(Id::from_index(self.id));
        recipient.core.available = self.available;
        recipient.core.priority = self.priority;
        recipient.core.limit = self.limit;
        recipient.sale_profit = self.sale_profit;
        recipient
    }
}

/// Connection attributes on the wire. The transport cost keeps its
/// original wire name `transportCost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributesRecord {
    pub units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_purchase_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_sale_profit: Option<f64>,
}

impl AttributesRecord {
    pub fn from_attributes(attributes: &ConnectionAttributes) -> Self {
        Self {
            units: attributes.units,
            limit: attributes.limit,
            priority: attributes.priority,
            transport_cost: attributes.unit_transport_cost,
            unit_purchase_cost: attributes.unit_purchase_cost,
            unit_sale_profit: attributes.unit_sale_profit,
        }
    }
}

/// One row of the request/response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: u32,
    pub supplier: SupplierRecord,
    pub recipient: RecipientRecord,
    pub attributes: AttributesRecord,
}

/// Serialize the store's connection list for the given solve variant,
/// checking the variant's readiness predicate first.
pub fn build_request(store: &Store, variant: SolveVariant) -> SolveResult<Vec<ConnectionRecord>> {
    check_ready(store, variant)?;

    let mut records = Vec::with_capacity(store.connections().len());
    for conn in store.connections() {
        records.push(record_for(store, conn)?);
    }
    Ok(records)
}

fn record_for(store: &Store, conn: &Connection) -> SolveResult<ConnectionRecord> {
    let supplier = store
        .supplier(conn.supplier)
        .ok_or(StoreError::NotFound {
            role: "supplier",
            id: conn.supplier,
        })?;
    let recipient = store
        .recipient(conn.recipient)
        .ok_or(StoreError::NotFound {
            role: "recipient",
            id: conn.recipient,
        })?;
    Ok(ConnectionRecord {
        id: conn.id.index(),
        supplier: SupplierRecord::from_supplier(supplier),
        recipient: RecipientRecord::from_recipient(recipient),
        attributes: AttributesRecord::from_attributes(&conn.attributes),
    })
}

/// The readiness predicate gating a solve request.
pub fn check_ready(store: &Store, variant: SolveVariant) -> SolveResult<()> {
    for conn in store.connections() {
        if conn.attributes.unit_transport_cost.is_none() {
            return not_ready(format!("connection {} has no transport cost", conn.id));
        }
    }
    if variant == SolveVariant::Mediator {
        for supplier in store.suppliers() {
            if supplier.purchase_cost.is_none() {
                return not_ready(format!(
                    "supplier {:?} has no purchase cost",
                    supplier.name()
                ));
            }
        }
        for recipient in store.recipients() {
            if recipient.sale_profit.is_none() {
                return not_ready(format!(
                    "recipient {:?} has no sale profit",
                    recipient.name()
                ));
            }
        }
    }
    Ok(())
}

fn not_ready<T>(what: String) -> SolveResult<T> {
    warn!(%what, "solve request rejected");
    Err(SolveError::NotReady { what })
}

/// Parse a solver response body. Unparseable or empty payloads are
/// rejected as [`SolveError::MalformedResponse`].
pub fn parse_response(body: &str) -> SolveResult<Vec<ConnectionRecord>> {
    let records: Vec<ConnectionRecord> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "unparseable solver response");
        SolveError::MalformedResponse {
            what: e.to_string(),
        }
    })?;
    if records.is_empty() {
        warn!("empty solver response");
        return Err(SolveError::MalformedResponse {
            what: "empty connection list".to_string(),
        });
    }
    Ok(records)
}
