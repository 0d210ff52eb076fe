//! Vertica SQL dialect.
//!
//! Vertica features:
//! - ANSI identifier quoting (`"`)
//! - Session-scoped `LOCAL TEMPORARY` tables with `ON COMMIT PRESERVE ROWS`
//! - Projection clauses on CREATE TABLE AS: ORDER BY, SEGMENTED BY ... ALL NODES,
//!   UNSEGMENTED ALL NODES, KSAFE
//! - PARTITION BY with hierarchical GROUP BY and ACTIVEPARTITIONCOUNT

use super::helpers;
use super::SqlDialect;

/// Vertica SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Vertica;

impl SqlDialect for Vertica {
    fn name(&self) -> &'static str {
        "vertica"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn supports_projection_clauses(&self) -> bool {
        true
    }

    fn supports_partition_clause(&self) -> bool {
        true
    }
}
