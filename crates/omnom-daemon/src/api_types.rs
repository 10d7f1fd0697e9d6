//! Form and JSON types for omnom-daemon HTTP endpoints.
//!
//! No business logic lives here.

use omnom_orders::Order;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Form posts (order page)
// ---------------------------------------------------------------------------

/// `POST /` body. `orderStatus` = `"<orderID>_<status>"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusForm {
    #[serde(rename = "orderStatus", default)]
    pub order_status: String,
}

/// `POST /notifyCustomer` body. `sendMessageTo` = order id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyCustomerForm {
    #[serde(rename = "sendMessageTo", default)]
    pub send_message_to: String,
}

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
    /// Name of the wired SMS gateway ("paper" | "messagebird").
    pub gateway: &'static str,
    pub daemon_uptime_secs: u64,
}

// ---------------------------------------------------------------------------
// /v1/orders
// ---------------------------------------------------------------------------

/// Read-only order list for tooling. Same data the order page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}
