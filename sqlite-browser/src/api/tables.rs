//! Table and database listing endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::path::Path;

use crate::api::{error_response, required_parameter, status_response, BrowserState};
use crate::database::traits::DatabaseProvider;
use crate::schema::{DatabasesResponse, TablesQuery, TablesResponse};

/// Handler for GET /api/tables?db=<path>
///
/// Returns the names of all tables in the database file.
///
/// Response:
/// ```json
/// { "tables": ["items", "orders"] }
/// ```
///
/// Status codes: 400 when `db` is missing, 404 when the file does not exist,
/// 500 when it cannot be opened or read.
pub async fn list_tables_handler<DB: DatabaseProvider>(
    State(state): State<BrowserState<DB>>,
    query: Result<Query<TablesQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return status_response(StatusCode::BAD_REQUEST);
    };

    let database_path = match required_parameter(query.db, "db") {
        Ok(path) => path,
        Err(error) => return error_response(&error),
    };

    match state.database.list_tables(Path::new(&database_path)).await {
        Ok(tables) => (StatusCode::OK, Json(TablesResponse { tables })).into_response(),
        Err(error) => error_response(&error),
    }
}

/// Handler for GET /api/databases
///
/// Returns the configured databases in configuration order. The filesystem
/// is not consulted.
pub async fn list_databases_handler<DB: DatabaseProvider>(
    State(state): State<BrowserState<DB>>,
) -> Response {
    let response = DatabasesResponse {
        databases: &state.known_databases,
    };

    (StatusCode::OK, Json(response)).into_response()
}
