//! SQLite database provider implementation

use crate::database::identifier::{quote_identifier, validate_identifier};
use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::database::ROW_SAMPLE_LIMIT;
use crate::schema::{CellValue, TableData};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row, TypeInfo, ValueRef};
use std::io::ErrorKind;
use std::path::Path;

/// SQLite database provider
///
/// Holds no connection. Each call opens its own read-only connection to the
/// requested file and closes it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteReader;

impl SqliteReader {
    /// Create a new SQLite reader
    pub fn new() -> Self {
        Self
    }

    /// Make sure `path` names an existing regular file
    async fn check_path(path: &Path) -> Result<(), DatabaseError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(DatabaseError::OpenFailed(format!(
                "{} is not a regular file",
                path.display()
            ))),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(DatabaseError::NotFound(path.display().to_string()))
            }
            Err(error) => Err(DatabaseError::OpenFailed(format!(
                "{}: {}",
                path.display(),
                error
            ))),
        }
    }

    /// Open a read-only connection and verify the file header
    async fn open(path: &Path) -> Result<SqliteConnection, DatabaseError> {
        Self::check_path(path).await?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let mut connection = SqliteConnection::connect_with(&options)
            .await
            .map_err(|error| DatabaseError::OpenFailed(format!("{}: {}", path.display(), error)))?;

        // SQLite opens lazily; reading the schema cookie forces the header check
        if let Err(error) = sqlx::query("PRAGMA schema_version")
            .execute(&mut connection)
            .await
        {
            Self::close(connection).await;
            return Err(DatabaseError::OpenFailed(format!(
                "{}: {}",
                path.display(),
                error
            )));
        }

        Ok(connection)
    }

    async fn close(connection: SqliteConnection) {
        if let Err(error) = connection.close().await {
            tracing::warn!("Failed to close database connection: {}", error);
        }
    }

    async fn read_tables(connection: &mut SqliteConnection) -> Result<Vec<String>, DatabaseError> {
        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .fetch_all(&mut *connection)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DatabaseError::from))
            .collect()
    }

    async fn read_table_data(
        connection: &mut SqliteConnection,
        table: &str,
    ) -> Result<TableData, DatabaseError> {
        let quoted_table = quote_identifier(table);

        // table_xinfo also reports generated columns, which SELECT * returns.
        // hidden = 1 marks virtual table columns that SELECT * leaves out.
        let columns_query = format!("PRAGMA table_xinfo({})", quoted_table);
        let column_rows = sqlx::query(&columns_query)
            .fetch_all(&mut *connection)
            .await?;

        let mut columns = Vec::with_capacity(column_rows.len());
        for row in &column_rows {
            let hidden: i64 = row.try_get("hidden")?;
            if hidden != 1 {
                columns.push(row.try_get::<String, _>("name")?);
            }
        }

        if columns.is_empty() {
            return Err(DatabaseError::QueryFailed(format!("no such table: {}", table)));
        }

        let select_query = format!("SELECT * FROM {} LIMIT ?", quoted_table);
        let rows = sqlx::query(&select_query)
            .bind(ROW_SAMPLE_LIMIT)
            .fetch_all(&mut *connection)
            .await?;

        let rows = rows
            .iter()
            .map(Self::row_to_cells)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableData { columns, rows })
    }

    /// Convert a SQLite row to one cell per result column
    fn row_to_cells(row: &SqliteRow) -> Result<Vec<CellValue>, DatabaseError> {
        (0..row.len())
            .map(|index| Self::extract_cell(row, index))
            .collect()
    }

    /// Extract one cell, tagged by the storage class of the stored value
    ///
    /// The declared column type is only an affinity in SQLite, so it is not
    /// consulted here.
    fn extract_cell(row: &SqliteRow, index: usize) -> Result<CellValue, DatabaseError> {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(CellValue::Null);
        }

        let type_info = raw.type_info();
        let cell = match type_info.name() {
            "INTEGER" => CellValue::Integer(row.try_get(index)?),
            "REAL" => CellValue::Real(row.try_get(index)?),
            "TEXT" => {
                // Text is not guaranteed to be valid UTF-8
                let bytes: Vec<u8> = row.try_get(index)?;
                CellValue::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => CellValue::Blob(row.try_get(index)?),
        };

        Ok(cell)
    }
}

#[async_trait]
impl DatabaseProvider for SqliteReader {
    async fn list_tables(&self, path: &Path) -> Result<Vec<String>, DatabaseError> {
        tracing::debug!(path = %path.display(), "Listing tables");

        let mut connection = Self::open(path).await?;
        let result = Self::read_tables(&mut connection).await;
        Self::close(connection).await;

        result
    }

    async fn fetch_table_data(
        &self,
        path: &Path,
        table: &str,
    ) -> Result<TableData, DatabaseError> {
        tracing::debug!(path = %path.display(), table, "Fetching table data");

        if path.as_os_str().is_empty() {
            return Err(DatabaseError::InvalidInput("empty database path".to_string()));
        }
        let table = validate_identifier(table)?;

        let mut connection = Self::open(path).await?;
        let result = Self::read_table_data(&mut connection, table).await;
        Self::close(connection).await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_database;
    use tempfile::TempDir;

    const ITEMS: &[&str] = &[
        "CREATE TABLE items (id INTEGER, name TEXT)",
        "INSERT INTO items VALUES (1, 'a'), (2, 'b')",
    ];

    #[tokio::test]
    async fn test_list_tables() {
        let directory = TempDir::new().unwrap();
        let path = create_database(
            &directory,
            "shop.db",
            &[
                "CREATE TABLE items (id INTEGER, name TEXT)",
                "CREATE TABLE orders (id INTEGER, item_id INTEGER)",
                "CREATE VIEW item_names AS SELECT name FROM items",
                "CREATE INDEX orders_by_item ON orders (item_id)",
            ],
        )
        .await;

        let mut tables = SqliteReader::new().list_tables(&path).await.unwrap();
        tables.sort();
        assert_eq!(tables, vec!["items", "orders"]);
    }

    #[tokio::test]
    async fn test_list_tables_empty_database() {
        let directory = TempDir::new().unwrap();
        let path = create_database(&directory, "empty.db", &["PRAGMA user_version = 1"]).await;

        let tables = SqliteReader::new().list_tables(&path).await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("missing.db");
        let reader = SqliteReader::new();

        assert!(matches!(
            reader.list_tables(&path).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(
            reader.fetch_table_data(&path, "items").await,
            Err(DatabaseError::NotFound(_))
        ));
        // The read-only open must not have created the file
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_non_database_file_fails_to_open() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("notes.db");
        std::fs::write(&path, "definitely not a sqlite database\n".repeat(64)).unwrap();

        let result = SqliteReader::new().list_tables(&path).await;
        assert!(matches!(result, Err(DatabaseError::OpenFailed(_))), "{:?}", result);
    }

    #[tokio::test]
    async fn test_directory_fails_to_open() {
        let directory = TempDir::new().unwrap();

        let result = SqliteReader::new().list_tables(directory.path()).await;
        assert!(matches!(result, Err(DatabaseError::OpenFailed(_))), "{:?}", result);
    }

    #[tokio::test]
    async fn test_fetch_table_data() {
        let directory = TempDir::new().unwrap();
        let path = create_database(&directory, "items.db", ITEMS).await;

        let data = SqliteReader::new()
            .fetch_table_data(&path, "items")
            .await
            .unwrap();

        assert_eq!(data.columns, vec!["id", "name"]);
        assert_eq!(
            data.rows,
            vec![
                vec![CellValue::Integer(1), CellValue::Text("a".to_string())],
                vec![CellValue::Integer(2), CellValue::Text("b".to_string())],
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_caps_rows() {
        let directory = TempDir::new().unwrap();
        let path = create_database(
            &directory,
            "numbers.db",
            &[
                "CREATE TABLE numbers (value INTEGER, square INTEGER)",
                "WITH RECURSIVE sequence(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM sequence WHERE x < 250) \
                 INSERT INTO numbers SELECT x, x * x FROM sequence",
            ],
        )
        .await;

        let data = SqliteReader::new()
            .fetch_table_data(&path, "numbers")
            .await
            .unwrap();

        assert_eq!(data.rows.len(), ROW_SAMPLE_LIMIT as usize);
        assert!(data.rows.iter().all(|row| row.len() == data.columns.len()));
    }

    #[tokio::test]
    async fn test_fetch_mixed_storage_classes() {
        let directory = TempDir::new().unwrap();
        let path = create_database(
            &directory,
            "mixed.db",
            &[
                "CREATE TABLE anything (value)",
                "INSERT INTO anything VALUES (NULL), (42), (2.5), ('text'), (x'00ff')",
            ],
        )
        .await;

        let data = SqliteReader::new()
            .fetch_table_data(&path, "anything")
            .await
            .unwrap();

        let cells: Vec<CellValue> = data.rows.into_iter().flatten().collect();
        assert_eq!(
            cells,
            vec![
                CellValue::Null,
                CellValue::Integer(42),
                CellValue::Real(2.5),
                CellValue::Text("text".to_string()),
                CellValue::Blob(vec![0x00, 0xff]),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_table_keeps_columns() {
        let directory = TempDir::new().unwrap();
        let path = create_database(
            &directory,
            "empty_table.db",
            &["CREATE TABLE events (id INTEGER PRIMARY KEY, kind TEXT, payload BLOB)"],
        )
        .await;

        let data = SqliteReader::new()
            .fetch_table_data(&path, "events")
            .await
            .unwrap();

        assert_eq!(data.columns, vec!["id", "kind", "payload"]);
        assert!(data.rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_includes_generated_columns() {
        let directory = TempDir::new().unwrap();
        let path = create_database(
            &directory,
            "generated.db",
            &[
                "CREATE TABLE prices (net INTEGER, gross INTEGER GENERATED ALWAYS AS (net * 2) VIRTUAL)",
                "INSERT INTO prices (net) VALUES (5)",
            ],
        )
        .await;

        let data = SqliteReader::new()
            .fetch_table_data(&path, "prices")
            .await
            .unwrap();

        assert_eq!(data.columns, vec!["net", "gross"]);
        assert_eq!(
            data.rows,
            vec![vec![CellValue::Integer(5), CellValue::Integer(10)]]
        );
    }

    #[tokio::test]
    async fn test_fetch_unknown_table_fails() {
        let directory = TempDir::new().unwrap();
        let path = create_database(&directory, "items.db", ITEMS).await;

        let result = SqliteReader::new().fetch_table_data(&path, "nosuch").await;
        assert!(matches!(result, Err(DatabaseError::QueryFailed(_))), "{:?}", result);
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_identifier() {
        let directory = TempDir::new().unwrap();
        let path = create_database(&directory, "items.db", ITEMS).await;
        let reader = SqliteReader::new();

        for table in ["", "items; DROP TABLE items", "items--", "\"items\""] {
            assert!(matches!(
                reader.fetch_table_data(&path, table).await,
                Err(DatabaseError::InvalidInput(_))
            ));
        }

        // Rejection happens before the path is even looked at
        let missing = directory.path().join("missing.db");
        assert!(matches!(
            reader.fetch_table_data(&missing, "bad name").await,
            Err(DatabaseError::InvalidInput(_))
        ));

        let data = reader.fetch_table_data(&path, "items").await.unwrap();
        assert_eq!(data.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_path() {
        let result = SqliteReader::new()
            .fetch_table_data(Path::new(""), "items")
            .await;
        assert!(matches!(result, Err(DatabaseError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reader_never_writes() {
        let directory = TempDir::new().unwrap();
        let path = create_database(&directory, "items.db", ITEMS).await;
        let before = std::fs::read(&path).unwrap();

        let reader = SqliteReader::new();
        reader.list_tables(&path).await.unwrap();
        reader.fetch_table_data(&path, "items").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
