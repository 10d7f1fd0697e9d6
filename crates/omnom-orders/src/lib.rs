//! omnom-orders
//!
//! Order model, the in-memory Order Store, the Status Policy that turns an
//! order status into customer-facing SMS text, and the Order Service that
//! ties them together with a [`NotificationGateway`].
//!
//! Concrete gateways (MessageBird, paper) live in `omnom-sms`; the HTTP
//! surface lives in `omnom-daemon`. Nothing in this crate does I/O itself.

mod error;
mod types;

pub mod gateway;
pub mod policy;
pub mod request;
pub mod service;
pub mod store;

pub use error::OrderError;
pub use types::{Order, OrderStatus};

pub use gateway::{NotificationGateway, NotifyError, SmsReceipt, SmsRequest};
pub use policy::{status_message, status_message_for, FALLBACK_MESSAGE};
pub use request::{StatusChange, STATUS_CHANGE_SEPARATOR};
pub use service::{NotifyReport, OrderService, DEFAULT_ORIGINATOR};
pub use store::{seed_orders, OrderStore};
