//! HTTP server layer
//!
//! Axum server with:
//! - HTML pages rendered through [`crate::render`]
//! - Form posts answered with `303 See Other` back to the index
//! - Request tracing and a per-request timeout
//! - Graceful shutdown
//! - Plain-text error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
