//! Shared runtime state for omnom-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The order store itself
//! lives inside [`OrderService`] behind its own lock.

use std::sync::Arc;
use std::time::Instant;

use omnom_orders::{NotificationGateway, OrderService, OrderStore};

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    /// Static build metadata.
    pub build: BuildInfo,
    /// Order store + status policy + gateway.
    pub orders: OrderService,
    /// Captured at construction; uptime is measured from here.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(orders: OrderService) -> Self {
        Self {
            build: BuildInfo {
                service: "omnom-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            orders,
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since this state was built (daemon boot).
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Seeded store, given gateway and originator.
    pub fn seeded(gateway: Arc<dyn NotificationGateway>, originator: impl Into<String>) -> Self {
        Self::new(OrderService::new(OrderStore::seeded(), gateway, originator))
    }
}
