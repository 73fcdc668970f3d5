//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One explicitly constructed [`Database`] handle, passed through state
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - List operations never issue one query per section
//! - Transactions for multi-step operations (cascade delete)

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::Database;
pub use repos::*;
