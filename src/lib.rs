//! # OMS Rust Backend
//!
//! Order execution service with real-time WebSocket updates.
//!
//! This crate provides a Rust backend for a live trading order pipeline:
//! clients create orders over a REST API, each order is executed after a
//! short simulated delay, and every status transition is pushed to all
//! connected WebSocket clients as it happens.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Core domain types (`Order`, `OrderId`, `OrderStatus`)
//! - [`config`]: Server and execution configuration from environment variables
//! - [`db`]: Order storage via the repository pattern
//! - [`services`]: Business logic, the execution task, and the event hub
//! - [`http`]: Axum-based HTTP server, WebSocket endpoint, and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod http;
pub mod services;
