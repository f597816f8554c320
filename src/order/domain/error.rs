//! Error types for order lifecycle validation and parsing.

use super::{OrderId, OrderOperation, OrderStatus};
use thiserror::Error;

/// Errors returned by order lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderDomainError {
    /// The operation is not permitted in the order's current status or
    /// driver-assignment condition.
    #[error("cannot {operation} order {order_id} while {status}")]
    InvalidState {
        /// Order identifier.
        order_id: OrderId,
        /// Rejected operation.
        operation: OrderOperation,
        /// Status at the time of the attempt.
        status: OrderStatus,
    },

    /// The order status has no recorded progress time.
    #[error("order {order_id} has no progress time recorded for status {status}")]
    UnsupportedProgressStatus {
        /// Order identifier.
        order_id: OrderId,
        /// Status lacking a progress timestamp.
        status: OrderStatus,
    },
}

/// Error returned while parsing order status from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);
