//! omnom-sms
//!
//! Concrete [`NotificationGateway`] adapters:
//!
//! - [`MessageBirdGateway`]: live SMS through the MessageBird REST API.
//! - [`PaperGateway`]: deterministic in-memory gateway for local runs and
//!   tests. Keeps a bounded log of recent requests, sends nothing.
//!
//! [`NotificationGateway`]: omnom_orders::NotificationGateway

mod messagebird;
mod paper;

pub use messagebird::{MessageBirdGateway, MESSAGEBIRD_BASE_URL};
pub use paper::{PaperGateway, DEFAULT_RETAIN};
