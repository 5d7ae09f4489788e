//! # sqlite-browser
//!
//! A read-only web browser for SQLite database files.
//!
//! ## Features
//!
//! - Table listing for any SQLite file on the server's filesystem
//! - Column names and a sample of up to 100 rows per table
//! - Per-cell typing preserved in JSON, blobs as base64
//! - A configurable list of known databases on the start page
//!
//! ## Security Warning
//!
//! **This is an operator tool!**
//!
//! - No authentication/authorization built-in
//! - Any file the server process can read may be opened by path
//! - Should never be exposed on public networks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sqlite_browser::{KnownDatabase, SqliteBrowserLayer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = SqliteBrowserLayer::sqlite(vec![KnownDatabase {
//!         label: "Inventory".to_string(),
//!         path: "/var/lib/app/inventory.db".to_string(),
//!     }])
//!     .into_router();
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8082").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

// Public modules
pub mod api;
pub mod config;
pub mod database;
pub mod frontend;
pub mod layer;
pub mod schema;

// Public exports
pub use config::ViewerConfig;
pub use layer::SqliteBrowserLayer;
pub use schema::{CellValue, KnownDatabase, TableData};

// Re-export database providers
pub use database::sqlite::SqliteReader;
pub use database::traits::{DatabaseError, DatabaseProvider};
