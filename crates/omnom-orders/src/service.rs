//! Order Service: the two operator actions.
//!
//! - **apply status change**: parse / validate, then `OrderStore::update_status`.
//! - **notify customer**: look up, render via the Status Policy, send through
//!   the [`NotificationGateway`].
//!
//! The store lives behind a `tokio::sync::RwLock` owned here. Locks are never
//! held across the gateway await: the order is snapshotted first.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::OrderError;
use crate::gateway::{NotificationGateway, NotifyError, SmsReceipt, SmsRequest};
use crate::policy::status_message;
use crate::request::StatusChange;
use crate::store::OrderStore;
use crate::types::Order;

/// Sender label used when none is configured.
pub const DEFAULT_ORIGINATOR: &str = "NomNom";

/// Outcome of a notify action for an order that exists.
///
/// `delivery` carries the gateway's verdict verbatim; a failure here has
/// already been logged and changed no order state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyReport {
    pub order_id: String,
    pub recipient: String,
    pub message: String,
    pub delivery: Result<SmsReceipt, NotifyError>,
}

impl NotifyReport {
    pub fn is_delivered(&self) -> bool {
        self.delivery.is_ok()
    }
}

/// Cloneable handle; clones share the same store and gateway.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<RwLock<OrderStore>>,
    gateway: Arc<dyn NotificationGateway>,
    originator: String,
}

impl OrderService {
    pub fn new(
        store: OrderStore,
        gateway: Arc<dyn NotificationGateway>,
        originator: impl Into<String>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            gateway,
            originator: originator.into(),
        }
    }

    /// Service over the seed order set with the default originator.
    pub fn seeded(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self::new(OrderStore::seeded(), gateway, DEFAULT_ORIGINATOR)
    }

    pub fn originator(&self) -> &str {
        &self.originator
    }

    pub fn gateway_name(&self) -> &'static str {
        self.gateway.gateway_name()
    }

    /// Snapshot of every order, insertion order.
    pub async fn orders(&self) -> Vec<Order> {
        self.store.read().await.list().to_vec()
    }

    pub async fn find(&self, id: &str) -> Option<Order> {
        self.store.read().await.find_by_id(id).cloned()
    }

    /// Apply an `"<orderID>_<status>"` form value.
    ///
    /// Malformed payloads, unknown statuses and unknown ids are logged and
    /// returned; the store is left unchanged in each case.
    pub async fn apply_status_change(&self, raw: &str) -> Result<Order, OrderError> {
        let change = match StatusChange::parse(raw) {
            Ok(c) => c,
            Err(e) => {
                warn!(payload = raw, error = %e, "status change rejected");
                return Err(e);
            }
        };
        self.apply(change).await
    }

    /// Apply a structured status change. Returns the updated order.
    pub async fn apply(&self, change: StatusChange) -> Result<Order, OrderError> {
        let mut store = self.store.write().await;
        if let Err(e) = store.update_status(&change.id, change.status) {
            warn!(order_id = %change.id, status = %change.status, error = %e, "status change ignored");
            return Err(e);
        }
        let updated = store
            .find_by_id(&change.id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound {
                id: change.id.clone(),
            })?;
        drop(store);

        info!(order_id = %updated.id, status = %updated.status, "order status updated");
        Ok(updated)
    }

    /// Send the status SMS for `id`.
    ///
    /// Unknown ids never reach the gateway. Gateway failures are logged and
    /// reported in [`NotifyReport::delivery`]; they are not retried.
    pub async fn notify_customer(&self, id: &str) -> Result<NotifyReport, OrderError> {
        let Some(order) = self.find(id).await else {
            warn!(order_id = id, "notify skipped: order not found");
            return Err(OrderError::NotFound { id: id.to_string() });
        };

        let message = status_message(Some(order.status), &order.name);
        let req = SmsRequest::to_one(&self.originator, &order.phone, &message);

        let delivery = self.gateway.send_sms(req).await;
        match &delivery {
            Ok(receipt) => info!(
                order_id = %order.id,
                status = %order.status,
                gateway = self.gateway.gateway_name(),
                message_id = %receipt.id,
                "customer notified"
            ),
            Err(e) => error!(
                order_id = %order.id,
                status = %order.status,
                gateway = self.gateway.gateway_name(),
                error = %e,
                "customer notification failed"
            ),
        }

        Ok(NotifyReport {
            order_id: order.id,
            recipient: order.phone,
            message,
            delivery,
        })
    }
}
