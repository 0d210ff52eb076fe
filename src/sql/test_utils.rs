//! Test utilities for SQL emission validation.
//!
//! sqlparser-rs has no Vertica dialect, so only statements rendered with
//! [`Dialect::Ansi`](super::dialect::Dialect::Ansi) (no projection or
//! partition clauses) can be round-tripped.

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string is syntactically valid generic SQL.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::validate_sql;
///
/// validate_sql("CREATE TABLE t AS (SELECT 1)").unwrap();
/// ```
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&GenericDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {}\nSQL: {}", e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("SELECT * FROM users").unwrap();
        validate_sql("CREATE TABLE t AS SELECT 1").unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        let result = validate_sql("SELEC * FORM users");
        assert!(result.is_err());
    }
}
