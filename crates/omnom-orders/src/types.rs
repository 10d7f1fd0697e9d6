use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Fulfilment stage of an order.
///
/// The set is closed. Free-form strings are parsed at the boundary with
/// [`OrderStatus::parse`]; anything outside the set is rejected and never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delayed,
    Delivered,
}

impl OrderStatus {
    /// Every status, in the order the order page offers them.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delayed,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delayed => "delayed",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Exact, case-sensitive parse of the wire value.
    pub fn parse(s: &str) -> Result<Self, OrderError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "delayed" => Ok(OrderStatus::Delayed),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(OrderError::UnknownStatus {
                raw: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One customer order.
///
/// Only `status` changes after creation, and only through
/// [`crate::OrderStore::update_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    /// E.164 destination for SMS notifications (e.g. `"+319876543210"`).
    pub phone: String,
    pub items: Vec<String>,
    pub status: OrderStatus,
}

impl Order {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        items: I,
        status: OrderStatus,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            items: items.into_iter().map(Into::into).collect(),
            status,
        }
    }
}
