//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ExecutionPolicy;
use crate::db::repository::OrderRepository;
use crate::services::events::OrderEvents;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for order storage
    pub repository: Arc<dyn OrderRepository>,
    /// Broadcast hub for order status updates
    pub events: OrderEvents,
    /// Delay range for simulated order execution
    pub execution: ExecutionPolicy,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        events: OrderEvents,
        execution: ExecutionPolicy,
    ) -> Self {
        Self {
            repository,
            events,
            execution,
        }
    }
}
