//! ANSI SQL dialect - base reference implementation.
//!
//! Renders the portable part of a table materialization. Vertica-only
//! clauses are omitted, which keeps the output parseable by generic SQL
//! tooling.

use super::SqlDialect;

/// ANSI SQL dialect (reference implementation).
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    // Uses default quote_identifier (double quotes, doubled to escape)
}
