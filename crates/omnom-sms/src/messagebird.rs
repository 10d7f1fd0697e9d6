//! MessageBird REST adapter.
//!
//! `POST {base_url}/messages` with `Authorization: AccessKey <key>`.
//! The access key is handed in by the caller (resolved once at startup by
//! `omnom-config`); it is never logged and `Debug` redacts it.

use chrono::{DateTime, Utc};
use omnom_orders::{NotificationGateway, NotifyError, SmsReceipt, SmsRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MESSAGEBIRD_BASE_URL: &str = "https://rest.messagebird.com";

#[derive(Clone)]
pub struct MessageBirdGateway {
    access_key: String,
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for MessageBirdGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBirdGateway")
            .field("access_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl MessageBirdGateway {
    pub fn new(access_key: String) -> Self {
        Self::new_with_base_url(access_key, MESSAGEBIRD_BASE_URL.to_string())
    }

    pub fn new_with_base_url(access_key: String, base_url: String) -> Self {
        Self {
            access_key,
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_messages_url(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl NotificationGateway for MessageBirdGateway {
    fn gateway_name(&self) -> &'static str {
        "messagebird"
    }

    async fn send_sms(&self, req: SmsRequest) -> Result<SmsReceipt, NotifyError> {
        if self.access_key.trim().is_empty() {
            return Err(NotifyError::Config(
                "messagebird access key is empty".to_string(),
            ));
        }
        if req.recipients.is_empty() {
            return Err(NotifyError::Config("sms has no recipients".to_string()));
        }

        let payload = MessageBirdCreateMessage {
            originator: &req.originator,
            recipients: &req.recipients,
            body: &req.body,
        };

        let resp = self
            .http
            .post(self.build_messages_url())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("AccessKey {}", self.access_key),
            )
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "messagebird response");

        if !status.is_success() {
            // Error bodies are usually `{"errors":[...]}`; fall back to the status line.
            let first = serde_json::from_slice::<MessageBirdErrorResponse>(&bytes)
                .ok()
                .and_then(|b| b.errors.into_iter().next());
            return Err(match first {
                Some(e) => NotifyError::Api {
                    code: e.code,
                    message: e.description,
                },
                None => NotifyError::Api {
                    code: None,
                    message: format!("http status {}", status.as_u16()),
                },
            });
        }

        let body: MessageBirdMessage = serde_json::from_slice(&bytes)
            .map_err(|e| NotifyError::Decode(format!("messagebird message json: {e}")))?;

        Ok(body.into_receipt())
    }
}

#[derive(Debug, Serialize)]
struct MessageBirdCreateMessage<'a> {
    originator: &'a str,
    recipients: &'a [String],
    body: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageBirdMessage {
    id: String,
    created_datetime: Option<String>,
    #[serde(default)]
    recipients: MessageBirdRecipients,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageBirdRecipients {
    #[serde(default)]
    total_count: u32,
    #[serde(default)]
    total_sent_count: u32,
}

impl MessageBirdMessage {
    fn into_receipt(self) -> SmsReceipt {
        let created_at = self
            .created_datetime
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        SmsReceipt {
            id: self.id,
            recipients_total: self.recipients.total_count,
            recipients_sent: self.recipients.total_sent_count,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MessageBirdErrorResponse {
    #[serde(default)]
    errors: Vec<MessageBirdApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageBirdApiError {
    code: Option<i64>,
    #[serde(default)]
    description: String,
}
