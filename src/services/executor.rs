//! Simulated order execution.
//!
//! Executing an order means waiting a random delay inside the configured
//! window and then transitioning it from `PENDING` to `EXECUTED`. The order
//! may be cancelled (and removed) while the executor sleeps, so the
//! transition is skipped when the order is gone.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{OrderId, OrderStatus};
use crate::config::ExecutionPolicy;
use crate::db::repository::OrderRepository;
use crate::db::services as db_services;
use crate::services::events::{OrderEvents, OrderUpdate};

/// Execute an order after a sampled delay, broadcasting the result.
///
/// Designed to be spawned as a background task; the order creation path
/// awaits the returned join handle when the caller asked for synchronous
/// execution.
pub async fn execute_after_delay(
    repo: Arc<dyn OrderRepository>,
    events: OrderEvents,
    policy: ExecutionPolicy,
    order_id: OrderId,
) {
    let delay = policy.sample_delay();
    debug!(%order_id, ?delay, "scheduling order execution");
    tokio::time::sleep(delay).await;

    // Only a PENDING order may execute; the atomic transition refuses
    // anything the cancel path got to first.
    match db_services::transition_status(
        repo.as_ref(),
        &order_id,
        OrderStatus::Pending,
        OrderStatus::Executed,
    )
    .await
    {
        Ok(order) => {
            debug!(%order_id, "order executed");
            events.publish(OrderUpdate::from(&order));
        }
        Err(e) if e.is_not_found() => {
            // Cancelled and removed while we slept.
            debug!(%order_id, "order gone before execution, skipping");
        }
        Err(e) if e.is_conflict() => {
            debug!(%order_id, "order no longer pending, skipping execution");
        }
        Err(e) => {
            warn!(%order_id, error = %e, "order execution failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::api::Order;
    use crate::db::LocalRepository;

    fn fast_policy() -> ExecutionPolicy {
        ExecutionPolicy::new(Duration::from_millis(1), Duration::from_millis(2)).unwrap()
    }

    #[tokio::test]
    async fn test_executes_pending_order() {
        let repo: Arc<dyn OrderRepository> = Arc::new(LocalRepository::new());
        let events = OrderEvents::new();
        let mut rx = events.subscribe();

        let order = Order::new(OrderId::generate());
        db_services::store_order(repo.as_ref(), order.clone())
            .await
            .unwrap();

        execute_after_delay(Arc::clone(&repo), events.clone(), fast_policy(), order.id.clone())
            .await;

        let stored = db_services::get_order(repo.as_ref(), &order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Executed);

        let update = rx.recv().await.unwrap();
        assert_eq!(update.order_id, order.id);
        assert_eq!(update.status, OrderStatus::Executed);
    }

    #[tokio::test]
    async fn test_skips_non_pending_order() {
        let repo: Arc<dyn OrderRepository> = Arc::new(LocalRepository::new());
        let events = OrderEvents::new();
        let mut rx = events.subscribe();

        let order = Order::new(OrderId::generate());
        db_services::store_order(repo.as_ref(), order.clone())
            .await
            .unwrap();
        db_services::transition_status(
            repo.as_ref(),
            &order.id,
            OrderStatus::Pending,
            OrderStatus::Executed,
        )
        .await
        .unwrap();

        execute_after_delay(Arc::clone(&repo), events.clone(), fast_policy(), order.id.clone())
            .await;

        // Already executed: no second transition, no broadcast.
        let stored = db_services::get_order(repo.as_ref(), &order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Executed);
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_skips_removed_order() {
        let repo: Arc<dyn OrderRepository> = Arc::new(LocalRepository::new());
        let events = OrderEvents::new();
        let mut rx = events.subscribe();

        // Never stored: the executor must not broadcast anything.
        execute_after_delay(
            Arc::clone(&repo),
            events.clone(),
            fast_policy(),
            OrderId::new("ghost"),
        )
        .await;

        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }
}
