//! HTTP server module.
//!
//! This module provides an axum-based HTTP server exposing the order
//! pipeline as a REST API plus a WebSocket feed of live status updates.
//! It reuses the service layer and repository pattern from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers + WebSocket)                   │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Order lifecycle rules                                  │
//! │  - Execution task, event broadcasting                     │
//! └───────────────────┬──────────────────────────────────────┘
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - In-memory order store                                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod ws;

pub use router::create_router;
pub use state::AppState;
