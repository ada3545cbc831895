//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::api::{Order, OrderId, OrderStatus};

// The WebSocket update payload doubles as its own DTO.
pub use crate::services::events::OrderUpdate;

/// Wire representation of an order.
///
/// Exposes exactly `id` and `status`; internal bookkeeping fields stay
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub status: OrderStatus,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
        }
    }
}

/// Query parameters for order creation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateOrderQuery {
    /// Whether to execute the order after creation (default: true)
    #[serde(default = "default_true")]
    pub execute_order: bool,
}

fn default_true() -> bool {
    true
}

/// Response for a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    /// Confirmation message
    pub detail: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Order store status
    pub store: String,
}
