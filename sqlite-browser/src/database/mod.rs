//! Database abstraction layer
//!
//! This module provides the read-only schema discovery and row sampling
//! used by the HTTP handlers.

pub mod identifier;
pub mod sqlite;
pub mod traits;

/// Maximum number of rows returned for a table, whatever its size
pub const ROW_SAMPLE_LIMIT: i64 = 100;

// Re-export the main trait
pub use traits::{DatabaseError, DatabaseProvider};
