//! Deterministic in-memory "paper" SMS gateway.
//!
//! - Receipt ids are `paper:sms:{n}`, `n` counting from 1 per gateway.
//! - No randomness, no timestamps, no network.
//! - `failing()` builds a gateway that records the request and then refuses
//!   it, for exercising the failure path.
//! - Only the most recent requests are kept ([`DEFAULT_RETAIN`] unless set
//!   with [`PaperGateway::with_retain`]); the count covers every send.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use omnom_orders::{NotificationGateway, NotifyError, SmsReceipt, SmsRequest};
use tracing::info;

/// Requests retained by [`PaperGateway::new`].
pub const DEFAULT_RETAIN: usize = 256;

#[derive(Debug, Default)]
struct SentLog {
    /// Most recent requests, oldest first, at most `retain` of them.
    window: VecDeque<SmsRequest>,
    /// Every request ever seen, including ones evicted from `window`.
    total: usize,
}

#[derive(Debug)]
pub struct PaperGateway {
    log: Mutex<SentLog>,
    retain: usize,
    fail_with: Option<NotifyError>,
}

impl Default for PaperGateway {
    fn default() -> Self {
        Self::with_retain(DEFAULT_RETAIN)
    }
}

impl PaperGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the last `retain` requests (at least one).
    pub fn with_retain(retain: usize) -> Self {
        Self {
            log: Mutex::new(SentLog::default()),
            retain: retain.max(1),
            fail_with: None,
        }
    }

    pub fn failing(err: NotifyError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    /// The retained requests, oldest first.
    pub fn sent(&self) -> Vec<SmsRequest> {
        self.lock().window.iter().cloned().collect()
    }

    /// All requests seen, evicted ones included.
    pub fn sent_count(&self) -> usize {
        self.lock().total
    }

    fn lock(&self) -> MutexGuard<'_, SentLog> {
        // A poisoned log is still a valid log.
        self.log.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait::async_trait]
impl NotificationGateway for PaperGateway {
    fn gateway_name(&self) -> &'static str {
        "paper"
    }

    async fn send_sms(&self, req: SmsRequest) -> Result<SmsReceipt, NotifyError> {
        let recipients = req.recipients.len() as u32;
        let n = {
            let mut log = self.lock();
            if log.window.len() == self.retain {
                log.window.pop_front();
            }
            log.window.push_back(req.clone());
            log.total += 1;
            log.total
        };

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        info!(
            originator = %req.originator,
            recipients = ?req.recipients,
            body = %req.body,
            "paper sms"
        );
        Ok(SmsReceipt {
            id: format!("paper:sms:{n}"),
            recipients_total: recipients,
            recipients_sent: recipients,
            created_at: None,
        })
    }
}
