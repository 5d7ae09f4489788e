//! Identifier validation
//!
//! SQLite cannot bind table or column names as parameters, so any name that
//! ends up inside query text must first pass this allow-list.

use std::sync::LazyLock;

use regex::Regex;

use crate::database::traits::DatabaseError;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern is valid")
});

/// Check that `identifier` only contains ASCII letters, digits and underscores
pub fn validate_identifier(identifier: &str) -> Result<&str, DatabaseError> {
    if IDENTIFIER_PATTERN.is_match(identifier) {
        Ok(identifier)
    } else {
        Err(DatabaseError::InvalidInput(format!(
            "invalid identifier: {:?}",
            identifier
        )))
    }
}

/// Quote an already validated identifier for interpolation
///
/// SQLite uses double quotes for identifiers. Quoting keeps names such as
/// `123` or keywords such as `order` addressable.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
