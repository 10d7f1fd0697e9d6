//! Scenario: the order store is not locked while an SMS is in flight.
//!
//! # Invariant under test
//!
//! `OrderService::notify_customer` snapshots the order and releases the
//! store lock before awaiting the gateway. While a send is parked inside the
//! gateway, status changes and reads on the same order must still complete.
//! The parked send reports the message built from the pre-change snapshot.

use std::sync::Arc;
use std::time::Duration;

use omnom_orders::{
    NotificationGateway, NotifyError, OrderService, OrderStatus, SmsReceipt, SmsRequest,
};
use tokio::sync::Notify;

const DON: &str = "81dc9bdb52d04dc20036dbd8313ed055";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parks every send until `release` is signalled; signals `entered` first.
#[derive(Default)]
struct ParkedGateway {
    entered: Notify,
    release: Notify,
}

#[async_trait::async_trait]
impl NotificationGateway for ParkedGateway {
    fn gateway_name(&self) -> &'static str {
        "parked"
    }

    async fn send_sms(&self, _req: SmsRequest) -> Result<SmsReceipt, NotifyError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(SmsReceipt {
            id: "parked-1".to_string(),
            recipients_total: 1,
            recipients_sent: 1,
            created_at: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Status change while a send is parked
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_change_completes_while_send_is_parked() {
    let gw = Arc::new(ParkedGateway::default());
    let svc = OrderService::seeded(gw.clone());

    let sender = svc.clone();
    let send = tokio::spawn(async move { sender.notify_customer(DON).await });

    // Wait until the send is inside the gateway.
    tokio::time::timeout(Duration::from_secs(5), gw.entered.notified())
        .await
        .expect("send never reached the gateway");

    let updated = tokio::time::timeout(
        Duration::from_secs(2),
        svc.apply_status_change("81dc9bdb52d04dc20036dbd8313ed055_delivered"),
    )
    .await
    .expect("store lock held across the gateway await")
    .expect("status change should apply");
    assert_eq!(updated.status, OrderStatus::Delivered);

    let orders = tokio::time::timeout(Duration::from_secs(2), svc.orders())
        .await
        .expect("store read blocked during send");
    assert_eq!(orders[2].status, OrderStatus::Delivered);

    gw.release.notify_one();
    let report = send
        .await
        .expect("send task panicked")
        .expect("order exists");

    assert!(report.is_delivered());
    assert!(
        report
            .message
            .contains("preparing your food with love"),
        "message built from the confirmed snapshot: {}",
        report.message
    );
}
