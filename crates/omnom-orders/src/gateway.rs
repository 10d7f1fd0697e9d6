//! Notification Gateway boundary.
//!
//! The Order Service hands a finished [`SmsRequest`] to whatever implements
//! [`NotificationGateway`] and only logs the outcome. Adapters live in
//! `omnom-sms`; tests use small in-file stubs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One outbound SMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRequest {
    /// Sender label shown on the handset (e.g. `"NomNom"`).
    pub originator: String,
    /// Destination phone numbers.
    pub recipients: Vec<String>,
    pub body: String,
}

impl SmsRequest {
    pub fn to_one(
        originator: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            originator: originator.into(),
            recipients: vec![recipient.into()],
            body: body.into(),
        }
    }
}

/// Delivery acknowledgement returned by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsReceipt {
    /// Gateway-assigned message id.
    pub id: String,
    pub recipients_total: u32,
    pub recipients_sent: u32,
    /// When the gateway accepted the message, if it says.
    pub created_at: Option<DateTime<Utc>>,
}

/// Errors a [`NotificationGateway`] implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Network or transport failure.
    Transport(String),
    /// The upstream API answered with an application-level error.
    Api { code: Option<i64>, message: String },
    /// The response payload could not be decoded.
    Decode(String),
    /// The gateway is not usable as configured (e.g. missing access key).
    Config(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Transport(msg) => write!(f, "sms transport error: {msg}"),
            NotifyError::Api {
                code: Some(c),
                message,
            } => write!(f, "sms api error code={c}: {message}"),
            NotifyError::Api {
                code: None,
                message,
            } => write!(f, "sms api error: {message}"),
            NotifyError::Decode(msg) => write!(f, "sms response decode error: {msg}"),
            NotifyError::Config(msg) => write!(f, "sms gateway config error: {msg}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Sends SMS messages on behalf of the Order Service.
///
/// # Contract
/// One call, one attempt. Implementations must not retry; the caller logs
/// the result and moves on.
#[async_trait::async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Short name for logs (e.g. `"messagebird"`, `"paper"`).
    fn gateway_name(&self) -> &'static str;

    async fn send_sms(&self, req: SmsRequest) -> Result<SmsReceipt, NotifyError>;
}
