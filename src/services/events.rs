//! Order status event hub.
//!
//! Every status transition is published here and fanned out to all
//! subscribers (one per WebSocket connection). The hub is a thin wrapper
//! around a `tokio::sync::broadcast` channel: publishing never blocks, and a
//! subscriber that falls behind misses events instead of stalling producers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::api::{Order, OrderId, OrderStatus};

/// Default number of events buffered per subscriber before lagging kicks in.
const DEFAULT_CAPACITY: usize = 256;

/// A single status update, as delivered to WebSocket clients.
///
/// `orderId` (camelCase) is part of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

impl From<&Order> for OrderUpdate {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            status: order.status,
        }
    }
}

/// Broadcast hub for order status updates.
#[derive(Clone)]
pub struct OrderEvents {
    tx: broadcast::Sender<OrderUpdate>,
}

impl OrderEvents {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future updates.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderUpdate> {
        self.tx.subscribe()
    }

    /// Publish an update to all current subscribers.
    ///
    /// Publishing with no subscribers is not an error; the update is simply
    /// dropped, like a broadcast into an empty room.
    pub fn publish(&self, update: OrderUpdate) {
        let _ = self.tx.send(update);
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for OrderEvents {
    fn default() -> Self {
        Self::new()
    }
}
