//! Structured status-change request and its `<orderID>_<status>` wire form.

use crate::error::OrderError;
use crate::types::OrderStatus;

/// Separator between order id and status in the `orderStatus` form value.
pub const STATUS_CHANGE_SEPARATOR: char = '_';

/// Operator request to move one order to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub status: OrderStatus,
}

impl StatusChange {
    pub fn new(id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    /// Parse `"<orderID>_<status>"`.
    ///
    /// Splits at the first separator. Order ids are hex digests and never
    /// contain `_`, so any further `_` belongs to the status and makes it
    /// unknown.
    pub fn parse(raw: &str) -> Result<Self, OrderError> {
        let raw = raw.trim();
        let Some((id, status)) = raw.split_once(STATUS_CHANGE_SEPARATOR) else {
            return Err(OrderError::MalformedStatusChange {
                raw: raw.to_string(),
            });
        };
        if id.is_empty() || status.is_empty() {
            return Err(OrderError::MalformedStatusChange {
                raw: raw.to_string(),
            });
        }
        Ok(Self {
            id: id.to_string(),
            status: OrderStatus::parse(status)?,
        })
    }

    /// Wire form, as rendered into the order page's form buttons.
    pub fn to_wire(&self) -> String {
        format!("{}{}{}", self.id, STATUS_CHANGE_SEPARATOR, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_payload() {
        let c = StatusChange::parse("c2972b5b4eef349fb1e5cc3e3150a2b6_confirmed").unwrap();
        assert_eq!(c.id, "c2972b5b4eef349fb1e5cc3e3150a2b6");
        assert_eq!(c.status, OrderStatus::Confirmed);
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert!(matches!(
            StatusChange::parse("c2972b5b4eef349fb1e5cc3e3150a2b6confirmed"),
            Err(OrderError::MalformedStatusChange { .. })
        ));
        assert!(matches!(
            StatusChange::parse(""),
            Err(OrderError::MalformedStatusChange { .. })
        ));
    }

    #[test]
    fn empty_halves_are_malformed() {
        for raw in ["_confirmed", "abc_", "_"] {
            assert!(
                matches!(
                    StatusChange::parse(raw),
                    Err(OrderError::MalformedStatusChange { .. })
                ),
                "raw={raw:?}"
            );
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            StatusChange::parse("abc_eaten").unwrap_err(),
            OrderError::UnknownStatus {
                raw: "eaten".to_string()
            }
        );
        assert!(matches!(
            StatusChange::parse("abc_delivered_late"),
            Err(OrderError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn wire_form_matches_parse_input() {
        let c = StatusChange::new("81dc9bdb52d04dc20036dbd8313ed055", OrderStatus::Delayed);
        assert_eq!(c.to_wire(), "81dc9bdb52d04dc20036dbd8313ed055_delayed");
        assert_eq!(StatusChange::parse(&c.to_wire()).unwrap(), c);
    }
}
