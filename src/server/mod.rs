//! Axum-based HTTP server for the vizor demo.
//!
//! This module sets up the HTTP surface: the embedded single-page UI, the
//! JSON API the UI calls, and the health/metrics endpoints.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints.
//! - `middleware`: Request ID and metrics middleware.
//! - `routes`: The main router configuration that ties everything together.
//! - `ui`: The embedded single-page UI.

mod handlers;
mod middleware;
mod routes;
mod ui;

pub use routes::{create_router, AppState};
