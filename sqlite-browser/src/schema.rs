//! Wire types for database introspection
//!
//! These types are built fresh for every request and serialized straight
//! into the JSON response bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize, Serializer};

/// A single cell read from a table, tagged by its SQLite storage class
///
/// SQLite types values per cell rather than per column, so two rows of the
/// same column may carry different variants.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Raw bytes, rendered as standard padded base64 in JSON
    Blob(Vec<u8>),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Integer(value) => serializer.serialize_i64(*value),
            // serde_json writes non-finite floats as null
            CellValue::Real(value) => serializer.serialize_f64(*value),
            CellValue::Text(value) => serializer.serialize_str(value),
            CellValue::Blob(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        }
    }
}

/// Column names and sampled rows for one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    /// Column names in declared order
    pub columns: Vec<String>,

    /// At most [`crate::database::ROW_SAMPLE_LIMIT`] rows, each with one cell per column
    pub rows: Vec<Vec<CellValue>>,
}

/// Response from listing tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    /// Table names in catalog order
    pub tables: Vec<String>,
}

/// A database file the operator has registered for quick access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownDatabase {
    /// Human readable name shown on the page
    pub label: String,

    /// Filesystem path passed back as the `db` query parameter
    pub path: String,
}

/// Response from listing known databases
#[derive(Debug, Clone, Serialize)]
pub struct DatabasesResponse<'a> {
    pub databases: &'a [KnownDatabase],
}

/// Query parameters for `GET /api/tables`
#[derive(Debug, Clone, Deserialize)]
pub struct TablesQuery {
    pub db: Option<String>,
}

/// Query parameters for `GET /api/data`
#[derive(Debug, Clone, Deserialize)]
pub struct DataQuery {
    pub db: Option<String>,
    pub table: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_json_types() {
        let row = vec![
            CellValue::Null,
            CellValue::Integer(-7),
            CellValue::Real(1.5),
            CellValue::Text("héllo".to_string()),
        ];
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!([null, -7, 1.5, "héllo"])
        );
    }

    #[test]
    fn test_blob_is_base64() {
        let cell = CellValue::Blob(vec![0x00, 0xff, 0x10, 0x80]);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "\"AP8QgA==\"");

        let empty = CellValue::Blob(Vec::new());
        assert_eq!(serde_json::to_string(&empty).unwrap(), "\"\"");
    }

    #[test]
    fn test_blob_is_not_truncated() {
        let bytes = vec![0xab; 300];
        let encoded = serde_json::to_value(CellValue::Blob(bytes.clone())).unwrap();
        let decoded = STANDARD.decode(encoded.as_str().unwrap()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_non_finite_real_renders_null() {
        let cell = CellValue::Real(f64::INFINITY);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "null");
    }

    #[test]
    fn test_table_data_shape() {
        let data = TableData {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![vec![CellValue::Integer(1), CellValue::Text("a".to_string())]],
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "columns": ["id", "name"], "rows": [[1, "a"]] })
        );
    }
}
