//! Repository trait and error types for order storage.

use std::fmt;

use async_trait::async_trait;

use crate::api::{Order, OrderId, OrderStatus};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
///
/// Provides additional information about where and why an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "store_order", "transition_status")
    pub operation: Option<String>,
    /// The order ID if applicable
    pub order_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the order ID.
    pub fn with_order_id(mut self, id: impl ToString) -> Self {
        self.order_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref id) = self.order_id {
            parts.push(format!("order_id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested order was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// An order with the same ID already exists.
    #[error("Duplicate: {message} {context}")]
    Duplicate {
        message: String,
        context: ErrorContext,
    },

    /// The order is not in the status a conditional transition expected.
    #[error("Conflict: {message} {context}")]
    Conflict {
        message: String,
        context: ErrorContext,
    },

    /// Unexpected storage failure.
    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn not_found(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    pub fn duplicate(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Duplicate {
            message: message.into(),
            context,
        }
    }

    pub fn conflict(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Conflict {
            message: message.into(),
            context,
        }
    }

    pub fn internal(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Internal {
            message: message.into(),
            context,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Abstract interface for order storage.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order. Fails if an order with the same ID exists.
    async fn insert_order(&self, order: Order) -> RepositoryResult<()>;

    /// Fetch a single order by ID.
    async fn fetch_order(&self, id: &OrderId) -> RepositoryResult<Order>;

    /// List all stored orders, oldest first.
    async fn list_orders(&self) -> RepositoryResult<Vec<Order>>;

    /// Transition an order from `expected` to `new` in one atomic step,
    /// returning the updated order.
    ///
    /// The status check and the write must happen under the same guard so a
    /// concurrent transition cannot slip between them. Fails with
    /// [`RepositoryError::Conflict`] when the current status differs from
    /// `expected`.
    async fn transition_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        new: OrderStatus,
    ) -> RepositoryResult<Order>;

    /// Remove an order, returning its last stored state.
    async fn remove_order(&self, id: &OrderId) -> RepositoryResult<Order>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
