//! Status Policy: order status + customer name -> SMS text.
//!
//! Total and side-effect free. Every input, recognised or not, maps to a
//! defined message; unknown statuses get [`FALLBACK_MESSAGE`].

use crate::types::OrderStatus;

/// Sent when the status is not one we recognise.
pub const FALLBACK_MESSAGE: &str =
    "We can't find your order! Please call our customer support for assistance.";

/// Message for a parsed status. `None` stands for "unrecognised".
pub fn status_message(status: Option<OrderStatus>, name: &str) -> String {
    match status {
        Some(OrderStatus::Pending) => format!(
            "Hello, {name}, thanks for ordering at OmNomNom Foods! \
             We're still working on your order. Please be patient with us!"
        ),
        Some(OrderStatus::Confirmed) => format!(
            "Hello, {name}, thanks for ordering at OmNomNom Foods! \
             We are now preparing your food with love and fresh ingredients and will keep you updated."
        ),
        Some(OrderStatus::Delayed) => format!(
            "Hello, {name}, sometimes good things take time! \
             Unfortunately your order is slightly delayed but will be delivered as soon as possible."
        ),
        Some(OrderStatus::Delivered) => format!(
            "Hello, {name}, you can start setting the table! \
             Our driver is on their way with your order! Bon appetit!"
        ),
        None => FALLBACK_MESSAGE.to_string(),
    }
}

/// Message for a free-form status string.
pub fn status_message_for(raw_status: &str, name: &str) -> String {
    status_message(OrderStatus::parse(raw_status).ok(), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_message_is_exact() {
        assert_eq!(
            status_message(Some(OrderStatus::Pending), "Hannah Hungry"),
            "Hello, Hannah Hungry, thanks for ordering at OmNomNom Foods! We're still working on your order. Please be patient with us!"
        );
    }

    #[test]
    fn confirmed_message_is_exact() {
        assert_eq!(
            status_message(Some(OrderStatus::Confirmed), "Don Cheetos"),
            "Hello, Don Cheetos, thanks for ordering at OmNomNom Foods! We are now preparing your food with love and fresh ingredients and will keep you updated."
        );
    }

    #[test]
    fn delayed_message_is_exact() {
        assert_eq!(
            status_message(Some(OrderStatus::Delayed), "Mike Madeater"),
            "Hello, Mike Madeater, sometimes good things take time! Unfortunately your order is slightly delayed but will be delivered as soon as possible."
        );
    }

    #[test]
    fn delivered_message_is_exact() {
        assert_eq!(
            status_message(Some(OrderStatus::Delivered), "Ace Adventures"),
            "Hello, Ace Adventures, you can start setting the table! Our driver is on their way with your order! Bon appetit!"
        );
    }

    #[test]
    fn unknown_and_empty_status_fall_back() {
        for raw in ["", "cancelled", "PENDING", "pending ", "delivered_late"] {
            assert_eq!(status_message_for(raw, "Anyone"), FALLBACK_MESSAGE, "raw={raw:?}");
        }
        assert_eq!(status_message(None, "Anyone"), FALLBACK_MESSAGE);
    }

    #[test]
    fn raw_and_typed_agree_for_known_statuses() {
        for s in OrderStatus::ALL {
            assert_eq!(status_message_for(s.as_str(), "X"), status_message(Some(s), "X"));
        }
    }
}
