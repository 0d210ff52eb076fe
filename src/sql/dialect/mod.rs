//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the dialect differences
//! a table materialization cares about:
//!
//! - Identifier quoting: `"` with `""` escaping
//! - Projection clauses on `CREATE TABLE AS`: ORDER BY, SEGMENTED BY,
//!   UNSEGMENTED, KSAFE
//! - Table partitioning: PARTITION BY, GROUP BY, ACTIVEPARTITIONCOUNT
//!
//! # Usage
//!
//! ```ignore
//! use vmat::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Vertica;
//! let quoted = dialect.quote_identifier("events");  // "events"
//! ```
//!
//! | Feature | Vertica | ANSI |
//! |---------|---------|------|
//! | LOCAL TEMPORARY ... ON COMMIT PRESERVE ROWS | ✓ | ✓ |
//! | Projection clauses (ORDER BY / SEGMENTED BY / KSAFE) | ✓ | ❌ |
//! | PARTITION BY ... GROUP BY ... ACTIVEPARTITIONCOUNT | ✓ | ❌ |

mod ansi;
pub mod helpers;
mod vertica;

// Ansi renders only the portable subset of a statement. It exists so that
// generated SQL can be checked against ordinary SQL parsers.
pub use ansi::Ansi;
pub use vertica::Vertica;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (database, schema, table).
    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    /// Whether projection clauses (ORDER BY, SEGMENTED BY, UNSEGMENTED,
    /// KSAFE) may follow the query of a `CREATE TABLE AS`.
    fn supports_projection_clauses(&self) -> bool {
        false
    }

    /// Whether `PARTITION BY` (with its GROUP BY and ACTIVEPARTITIONCOUNT
    /// refinements) may follow a `CREATE TABLE AS`.
    fn supports_partition_clause(&self) -> bool {
        false
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Vertica,
    Ansi,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Vertica => &Vertica,
            Dialect::Ansi => &Ansi,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn supports_projection_clauses(&self) -> bool {
        self.dialect().supports_projection_clauses()
    }

    fn supports_partition_clause(&self) -> bool {
        self.dialect().supports_partition_clause()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
