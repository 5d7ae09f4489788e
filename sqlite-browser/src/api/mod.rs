//! REST API endpoints
//!
//! This module contains all API endpoint handlers for the SQLite browser.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::schema::KnownDatabase;

pub mod rows;
pub mod tables;

// Re-export handlers for convenience
pub use rows::get_table_data_handler;
pub use tables::{list_databases_handler, list_tables_handler};

/// Shared, read-only state handed to every handler
pub struct BrowserState<DB: DatabaseProvider> {
    pub database: Arc<DB>,
    pub known_databases: Arc<[KnownDatabase]>,
}

impl<DB: DatabaseProvider> BrowserState<DB> {
    pub fn new(database: DB, known_databases: Vec<KnownDatabase>) -> Self {
        Self {
            database: Arc::new(database),
            known_databases: known_databases.into(),
        }
    }
}

// Manual impl: a derive would require DB: Clone
impl<DB: DatabaseProvider> Clone for BrowserState<DB> {
    fn clone(&self) -> Self {
        Self {
            database: Arc::clone(&self.database),
            known_databases: Arc::clone(&self.known_databases),
        }
    }
}

/// Extract a required query parameter, treating an empty value as missing
pub(crate) fn required_parameter(
    value: Option<String>,
    name: &str,
) -> Result<String, DatabaseError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DatabaseError::InvalidInput(format!(
            "missing query parameter '{}'",
            name
        ))),
    }
}

/// Render a minimal JSON error body for `status`
///
/// Only a fixed phrase per status is sent; internal details stay in the logs.
pub(crate) fn status_response(status: StatusCode) -> Response {
    let reason = match status {
        StatusCode::BAD_REQUEST => "invalid request",
        StatusCode::NOT_FOUND => "not found",
        _ => "internal server error",
    };

    (status, Json(serde_json::json!({ "error": reason }))).into_response()
}

/// Log `error` and render it as a response
pub(crate) fn error_response(error: &DatabaseError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!("{}", error);
    } else {
        tracing::warn!("{}", error);
    }

    status_response(status)
}

/// Fallback for every unrouted path
pub async fn not_found_handler() -> Response {
    status_response(StatusCode::NOT_FOUND)
}
