//! Thin service layer over the repository trait.
//!
//! These functions are the storage entry points used by the business logic
//! and the HTTP handlers. They add tracing around the raw repository calls
//! and keep callers independent of any concrete backend.

use tracing::debug;

use crate::api::{Order, OrderId, OrderStatus};
use crate::db::repository::{OrderRepository, RepositoryResult};

/// Store a new order.
pub async fn store_order(repo: &dyn OrderRepository, order: Order) -> RepositoryResult<()> {
    debug!(order_id = %order.id, "storing order");
    repo.insert_order(order).await
}

/// Fetch a single order by ID.
pub async fn get_order(repo: &dyn OrderRepository, id: &OrderId) -> RepositoryResult<Order> {
    repo.fetch_order(id).await
}

/// List all stored orders, oldest first.
pub async fn list_orders(repo: &dyn OrderRepository) -> RepositoryResult<Vec<Order>> {
    repo.list_orders().await
}

/// Atomically transition an order from `expected` to `new`, returning the
/// updated order.
pub async fn transition_status(
    repo: &dyn OrderRepository,
    id: &OrderId,
    expected: OrderStatus,
    new: OrderStatus,
) -> RepositoryResult<Order> {
    debug!(order_id = %id, %expected, %new, "transitioning order status");
    repo.transition_status(id, expected, new).await
}

/// Remove an order from the store.
pub async fn remove_order(repo: &dyn OrderRepository, id: &OrderId) -> RepositoryResult<Order> {
    debug!(order_id = %id, "removing order");
    repo.remove_order(id).await
}

/// Check that the store is reachable.
pub async fn health_check(repo: &dyn OrderRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
