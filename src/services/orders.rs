//! Order lifecycle business rules.
//!
//! Orchestrates storage, the execution task, and event broadcasting for the
//! create / fetch / cancel operations exposed by the HTTP layer.

use std::sync::Arc;

use tracing::info;

use crate::api::{Order, OrderId, OrderStatus};
use crate::config::ExecutionPolicy;
use crate::db::repository::{OrderRepository, RepositoryError};
use crate::db::services as db_services;
use crate::services::events::{OrderEvents, OrderUpdate};
use crate::services::executor;

/// Errors surfaced by order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order {0} not found")]
    NotFound(OrderId),

    #[error("Cannot cancel non-pending order")]
    NotCancellable,

    #[error("Execution task failed: {0}")]
    ExecutionTask(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for OrderError {
    fn from(err: RepositoryError) -> Self {
        OrderError::Repository(err)
    }
}

/// Create a new order in `PENDING` status and broadcast the update.
///
/// When `execute` is true, the execution task is spawned and awaited before
/// returning, so the result reflects the post-execution state and clients
/// subscribed to the event hub see `PENDING` followed by `EXECUTED`. When
/// false, the order is left pending.
pub async fn create_order(
    repo: &Arc<dyn OrderRepository>,
    events: &OrderEvents,
    policy: ExecutionPolicy,
    execute: bool,
) -> Result<Order, OrderError> {
    let order = Order::new(OrderId::generate());
    db_services::store_order(repo.as_ref(), order.clone()).await?;
    info!(order_id = %order.id, execute, "order created");
    events.publish(OrderUpdate::from(&order));

    if !execute {
        return Ok(order);
    }

    let task = tokio::spawn(executor::execute_after_delay(
        Arc::clone(repo),
        events.clone(),
        policy,
        order.id.clone(),
    ));
    task.await
        .map_err(|e| OrderError::ExecutionTask(e.to_string()))?;

    // Report the final stored state; if the order was cancelled and removed
    // mid-flight, cancellation is the terminal state the caller should see.
    match db_services::get_order(repo.as_ref(), &order.id).await {
        Ok(updated) => Ok(updated),
        Err(e) if e.is_not_found() => Ok(Order {
            status: OrderStatus::Cancelled,
            ..order
        }),
        Err(e) => Err(e.into()),
    }
}

/// Fetch a single order.
pub async fn get_order(
    repo: &Arc<dyn OrderRepository>,
    id: &OrderId,
) -> Result<Order, OrderError> {
    match db_services::get_order(repo.as_ref(), id).await {
        Ok(order) => Ok(order),
        Err(e) if e.is_not_found() => Err(OrderError::NotFound(id.clone())),
        Err(e) => Err(e.into()),
    }
}

/// List all orders, oldest first.
pub async fn list_orders(repo: &Arc<dyn OrderRepository>) -> Result<Vec<Order>, OrderError> {
    Ok(db_services::list_orders(repo.as_ref()).await?)
}

/// Cancel a `PENDING` order: broadcast `CANCELLED` and remove it.
///
/// Orders that have already executed (or are otherwise not pending) cannot
/// be cancelled.
pub async fn cancel_order(
    repo: &Arc<dyn OrderRepository>,
    events: &OrderEvents,
    id: &OrderId,
) -> Result<(), OrderError> {
    // The pending check and the write are one atomic repository call, so an
    // executor finishing concurrently can never be overwritten: whichever
    // transition runs second sees a non-PENDING order and fails.
    let cancelled = match db_services::transition_status(
        repo.as_ref(),
        id,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
    )
    .await
    {
        Ok(order) => order,
        Err(e) if e.is_not_found() => return Err(OrderError::NotFound(id.clone())),
        Err(e) if e.is_conflict() => return Err(OrderError::NotCancellable),
        Err(e) => return Err(e.into()),
    };
    events.publish(OrderUpdate::from(&cancelled));

    match db_services::remove_order(repo.as_ref(), id).await {
        Ok(_) => {
            info!(order_id = %id, "order cancelled");
            Ok(())
        }
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
