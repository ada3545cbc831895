//! In-memory repository implementation.
//!
//! Backs the service in production (the store is intentionally ephemeral;
//! orders do not outlive the process) and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{Order, OrderId, OrderStatus};
use crate::db::repository::{
    ErrorContext, OrderRepository, RepositoryError, RepositoryResult,
};

/// In-memory order store behind a read-write lock.
#[derive(Default)]
pub struct LocalRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

#[async_trait]
impl OrderRepository for LocalRepository {
    async fn insert_order(&self, order: Order) -> RepositoryResult<()> {
        let mut orders = self.orders.write();
        if orders.contains_key(&order.id) {
            return Err(RepositoryError::duplicate(
                format!("Order {} already exists", order.id),
                ErrorContext::new("insert_order").with_order_id(&order.id),
            ));
        }
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn fetch_order(&self, id: &OrderId) -> RepositoryResult<Order> {
        self.orders.read().get(id).cloned().ok_or_else(|| {
            RepositoryError::not_found(
                format!("Order {} not found", id),
                ErrorContext::new("fetch_order").with_order_id(id),
            )
        })
    }

    async fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.read().values().cloned().collect();
        // HashMap iteration order is arbitrary; present oldest first.
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }

    async fn transition_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> RepositoryResult<Order> {
        // Check and write under one guard; concurrent transitions serialize here.
        let mut orders = self.orders.write();
        let order = orders.get_mut(id).ok_or_else(|| {
            RepositoryError::not_found(
                format!("Order {} not found", id),
                ErrorContext::new("transition_status").with_order_id(id),
            )
        })?;
        if order.status != expected {
            return Err(RepositoryError::conflict(
                format!("Order {} is {}, expected {}", id, order.status, expected),
                ErrorContext::new("transition_status").with_order_id(id),
            ));
        }
        order.status = new;
        Ok(order.clone())
    }

    async fn remove_order(&self, id: &OrderId) -> RepositoryResult<Order> {
        self.orders.write().remove(id).ok_or_else(|| {
            RepositoryError::not_found(
                format!("Order {} not found", id),
                ErrorContext::new("remove_order").with_order_id(id),
            )
        })
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let repo = LocalRepository::new();
        let order = Order::new(OrderId::generate());
        repo.insert_order(order.clone()).await.unwrap();

        let fetched = repo.fetch_order(&order.id).await.unwrap();
        assert_eq!(fetched.id, order.id);
        assert_eq!(fetched.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails() {
        let repo = LocalRepository::new();
        let order = Order::new(OrderId::generate());
        repo.insert_order(order.clone()).await.unwrap();

        let err = repo.insert_order(order).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .fetch_order(&OrderId::new("nonexistent"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_orders_oldest_first() {
        let repo = LocalRepository::new();
        let first = Order::new(OrderId::generate());
        // Force distinct timestamps so the ordering is deterministic.
        let mut second = Order::new(OrderId::generate());
        second.created_at = first.created_at + chrono::Duration::milliseconds(1);

        repo.insert_order(second.clone()).await.unwrap();
        repo.insert_order(first.clone()).await.unwrap();

        let orders = repo.list_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first.id);
        assert_eq!(orders[1].id, second.id);
    }

    #[tokio::test]
    async fn test_transition_status() {
        let repo = LocalRepository::new();
        let order = Order::new(OrderId::generate());
        repo.insert_order(order.clone()).await.unwrap();

        let updated = repo
            .transition_status(&order.id, OrderStatus::Pending, OrderStatus::Executed)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Executed);

        let fetched = repo.fetch_order(&order.id).await.unwrap();
        assert_eq!(fetched.status, OrderStatus::Executed);
    }

    #[tokio::test]
    async fn test_transition_rejects_wrong_state() {
        let repo = LocalRepository::new();
        let order = Order::new(OrderId::generate());
        repo.insert_order(order.clone()).await.unwrap();
        repo.transition_status(&order.id, OrderStatus::Pending, OrderStatus::Executed)
            .await
            .unwrap();

        let err = repo
            .transition_status(&order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // The failed transition must not have touched the order.
        let fetched = repo.fetch_order(&order.id).await.unwrap();
        assert_eq!(fetched.status, OrderStatus::Executed);
    }

    #[tokio::test]
    async fn test_transition_missing_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .transition_status(
                &OrderId::new("nonexistent"),
                OrderStatus::Pending,
                OrderStatus::Executed,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_order() {
        let repo = LocalRepository::new();
        let order = Order::new(OrderId::generate());
        repo.insert_order(order.clone()).await.unwrap();

        let removed = repo.remove_order(&order.id).await.unwrap();
        assert_eq!(removed.id, order.id);
        assert!(repo.is_empty());

        let err = repo.remove_order(&order.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
