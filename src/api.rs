//! Core domain types for the order pipeline.
//!
//! These types model the lifecycle of a trading order: it is created in
//! `PENDING` status, transitions to `EXECUTED` after the simulated execution
//! delay, or to `CANCELLED` when a client cancels it before execution.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an order.
///
/// Generated identifiers are UUID v4 strings, but the type is deliberately an
/// opaque string wrapper: lookups with arbitrary strings must miss cleanly
/// (HTTP 404) rather than fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of an order.
///
/// Serialized in upper case on the wire (`"PENDING"`, `"EXECUTED"`,
/// `"CANCELLED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Executed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Executed => "EXECUTED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// A trading order.
///
/// `created_at` is internal bookkeeping; the wire representation exposed by
/// the HTTP layer carries only `id` and `status` (see `http::dto::OrderDto`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Order {
    /// Create a new order in `PENDING` status.
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now(),
        }
    }
}
