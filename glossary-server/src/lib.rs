//! glossary-server: HTTP server for a personal glossary
//!
//! Terms are organized into named sections. Both can be created, read and
//! deleted through a small set of HTML pages; terms can also be edited.
//! Everything is backed by a single local SQLite file.

pub mod db;
pub mod http;
pub mod models;
pub mod render;

pub use db::{Database, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use render::Renderer;
