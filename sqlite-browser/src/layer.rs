//! SqliteBrowserLayer - Main Axum integration layer
//!
//! This module provides the route table that dispatches HTTP requests to the
//! page, the table listing and the table data operations.

use crate::api::{
    get_table_data_handler, list_databases_handler, list_tables_handler, not_found_handler,
    BrowserState,
};
use crate::config::ViewerConfig;
use crate::database::sqlite::SqliteReader;
use crate::database::traits::DatabaseProvider;
use crate::frontend::serve_index_page;
use crate::schema::KnownDatabase;
use axum::{routing::get, Router};

/// Main layer for serving the SQLite browser from an Axum application
///
/// # Example
///
/// ```rust,no_run
/// use sqlite_browser::SqliteBrowserLayer;
///
/// # async fn example() {
/// let app = SqliteBrowserLayer::sqlite(Vec::new()).into_router();
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8082").await.unwrap();
/// axum::serve(listener, app).await.unwrap();
/// # }
/// ```
pub struct SqliteBrowserLayer<DB: DatabaseProvider> {
    database: DB,
    known_databases: Vec<KnownDatabase>,
}

impl<DB: DatabaseProvider> SqliteBrowserLayer<DB> {
    /// Create a new browser backed by `database`
    ///
    /// # Arguments
    ///
    /// * `database` - The database provider implementation
    /// * `known_databases` - Databases listed on the start page
    pub fn new(database: DB, known_databases: Vec<KnownDatabase>) -> Self {
        Self {
            database,
            known_databases,
        }
    }

    /// Convert into an Axum Router that can be served or merged
    ///
    /// The returned router includes:
    /// - `GET /` serving the embedded page
    /// - `GET /api/databases`, `GET /api/tables` and `GET /api/data`
    /// - A JSON 404 for every other path
    pub fn into_router(self) -> Router {
        let state = BrowserState::new(self.database, self.known_databases);

        Router::new()
            .route("/", get(serve_index_page))
            .route("/api/databases", get(list_databases_handler::<DB>))
            .route("/api/tables", get(list_tables_handler::<DB>))
            .route("/api/data", get(get_table_data_handler::<DB>))
            .fallback(not_found_handler)
            .with_state(state)
    }
}

impl SqliteBrowserLayer<SqliteReader> {
    /// Create a new browser reading SQLite files
    ///
    /// # Arguments
    ///
    /// * `known_databases` - Databases listed on the start page
    pub fn sqlite(known_databases: Vec<KnownDatabase>) -> Self {
        Self::new(SqliteReader::new(), known_databases)
    }

    /// Create a new browser from a loaded configuration
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::sqlite(config.databases.clone())
    }
}
