//! Order storage via the repository pattern.
//!
//! This module provides abstractions for order persistence, allowing the
//! storage backend to be swapped without touching the business logic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer (axum handlers)                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service layer (db::services) - thin CRUD orchestration  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository trait (db::repository)                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The only implementation is [`LocalRepository`], an in-memory store. The
//! trait boundary exists so handlers and services stay backend-agnostic.

pub mod local;
pub mod repository;
pub mod services;

pub use local::LocalRepository;
pub use repository::{
    ErrorContext, OrderRepository, RepositoryError, RepositoryResult,
};
