/// Errors raised by the Order Store and Order Service.
///
/// Every variant is recoverable: the HTTP layer logs it and re-renders the
/// current order list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No order with this id exists in the store.
    NotFound { id: String },
    /// A status-change payload could not be split into `<id>_<status>`.
    MalformedStatusChange { raw: String },
    /// The status value is not one of pending | confirmed | delayed | delivered.
    UnknownStatus { raw: String },
    /// Two orders share an id.
    DuplicateId { id: String },
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::NotFound { id } => write!(f, "ORDER_NOT_FOUND: id={id}"),
            OrderError::MalformedStatusChange { raw } => write!(
                f,
                "MALFORMED_STATUS_CHANGE: expected '<orderID>_<status>', got {raw:?}"
            ),
            OrderError::UnknownStatus { raw } => write!(
                f,
                "UNKNOWN_STATUS: {raw:?}; expected one of: pending | confirmed | delayed | delivered"
            ),
            OrderError::DuplicateId { id } => write!(f, "DUPLICATE_ORDER_ID: id={id}"),
        }
    }
}

impl std::error::Error for OrderError {}
