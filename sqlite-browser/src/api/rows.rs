//! Table data endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::path::Path;

use crate::api::{error_response, required_parameter, status_response, BrowserState};
use crate::database::traits::DatabaseProvider;
use crate::schema::DataQuery;

/// Handler for GET /api/data?db=<path>&table=<name>
///
/// Returns the column names of `table` and up to 100 of its rows in the
/// engine's default scan order. Blob cells are base64 strings.
///
/// Response:
/// ```json
/// { "columns": ["id", "name"], "rows": [[1, "a"], [2, "b"]] }
/// ```
pub async fn get_table_data_handler<DB: DatabaseProvider>(
    State(state): State<BrowserState<DB>>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return status_response(StatusCode::BAD_REQUEST);
    };

    let database_path = match required_parameter(query.db, "db") {
        Ok(path) => path,
        Err(error) => return error_response(&error),
    };
    let table_name = match required_parameter(query.table, "table") {
        Ok(table) => table,
        Err(error) => return error_response(&error),
    };

    match state
        .database
        .fetch_table_data(Path::new(&database_path), &table_name)
        .await
    {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(error) => error_response(&error),
    }
}
