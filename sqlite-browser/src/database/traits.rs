//! Database provider trait
//!
//! This trait defines the read-only operations the HTTP layer relies on.

use crate::schema::TableData;
use async_trait::async_trait;
use axum::http::StatusCode;
use std::path::Path;
use thiserror::Error;

/// Database provider trait for schema discovery and row sampling
///
/// Providers hold no per-database state. Every call receives the path of the
/// database file it should read and is independent of every other call.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + 'static {
    /// List the names of all tables in the database at `path`
    ///
    /// Names are returned in catalog order. A database without tables yields
    /// an empty vector.
    async fn list_tables(&self, path: &Path) -> Result<Vec<String>, DatabaseError>;

    /// Fetch column names and a bounded sample of rows from `table`
    ///
    /// # Arguments
    ///
    /// * `path` - Database file to read
    /// * `table` - Table name, validated as an identifier before use
    async fn fetch_table_data(&self, path: &Path, table: &str)
        -> Result<TableData, DatabaseError>;
}

/// Database error type
///
/// The carried message is a server-side diagnostic and is never sent to clients.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Missing parameter or rejected identifier
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database file does not exist
    #[error("Database not found: {0}")]
    NotFound(String),

    /// File exists but could not be opened as a database
    #[error("Failed to open database: {0}")]
    OpenFailed(String),

    /// Catalog or data query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl DatabaseError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            DatabaseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DatabaseError::NotFound(_) => StatusCode::NOT_FOUND,
            DatabaseError::OpenFailed(_) | DatabaseError::QueryFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::QueryFailed(error.to_string())
    }
}
