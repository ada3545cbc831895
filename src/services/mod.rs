//! Service layer for business logic and orchestration.
//!
//! This module sits between the HTTP handlers and the storage layer. It owns
//! the order lifecycle rules, the simulated execution task, and the event hub
//! that fans status updates out to WebSocket clients.

pub mod events;
pub mod executor;
pub mod orders;

pub use events::{OrderEvents, OrderUpdate};
pub use orders::OrderError;
