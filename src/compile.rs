//! End-to-end compilation of a table materialization to SQL.
//!
//! ```text
//! TableConfig + Relation + query → (checks) → CreateTableAs → SQL
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vmat::compile::{compile_table, compile_table_with, CompileOptions};
//! use vmat::model::TableConfig;
//! use vmat::sql::Relation;
//!
//! let config = TableConfig::new().segmented_by("hash(user_id)");
//! let relation = Relation::parse("analytics.public.events")?;
//!
//! let sql = compile_table(&config, &relation, "select * from raw_events");
//!
//! let strict = CompileOptions::default().strict();
//! let output = compile_table_with(&config, &relation, "select * from raw_events", strict)?;
//! println!("{}", output.sql);
//! ```

use crate::model::table::{ConfigWarning, ModelError, TableConfig};
use crate::sql::ddl::CreateTableAs;
use crate::sql::relation::Relation;
use crate::sql::{Dialect, SqlDialect};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Invalid table config: {0}")]
    InvalidConfig(#[from] ModelError),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// SQL dialect to generate.
    pub dialect: Dialect,

    /// Reject configs that would render invalid SQL instead of rendering
    /// them as given.
    pub strict: bool,
}

impl CompileOptions {
    /// Set the SQL dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable strict config checks.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling a table materialization.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The generated SQL string.
    pub sql: String,

    /// The dialect used for generation.
    pub dialect: Dialect,

    /// Suspicious options found in the config.
    pub warnings: Vec<ConfigWarning>,
}

// ============================================================================
// Entry points
// ============================================================================

/// Render the Vertica `CREATE TABLE AS` statement for a table model.
///
/// Never fails; suspicious configs are logged and rendered as given.
pub fn compile_table(config: &TableConfig, relation: &Relation, query: &str) -> String {
    let stmt = CreateTableAs::new(relation.clone(), query).config(config.clone());
    render(&stmt, Dialect::Vertica, &config.warnings())
}

/// Render with explicit options.
pub fn compile_table_with(
    config: &TableConfig,
    relation: &Relation,
    query: &str,
    options: CompileOptions,
) -> CompileResult<CompileOutput> {
    if options.strict {
        config.validate()?;
    }

    let warnings = config.warnings();
    let stmt = CreateTableAs::new(relation.clone(), query).config(config.clone());
    let sql = render(&stmt, options.dialect, &warnings);

    Ok(CompileOutput {
        sql,
        dialect: options.dialect,
        warnings,
    })
}

fn render(stmt: &CreateTableAs, dialect: Dialect, warnings: &[ConfigWarning]) -> String {
    for warning in warnings {
        tracing::warn!(relation = %stmt.relation, "{}", warning);
    }

    let dropped = dropped_options(&stmt.config, dialect);
    if !dropped.is_empty() {
        tracing::warn!(
            relation = %stmt.relation,
            %dialect,
            options = %dropped.join(", "),
            "dialect does not render these options; they are omitted"
        );
    }

    let sql = stmt.to_sql(dialect);
    tracing::debug!(
        relation = %stmt.relation,
        %dialect,
        temporary = stmt.config.is_temporary(),
        len = sql.len(),
        "rendered create table as"
    );
    sql
}

/// Configured options the dialect has no clause for.
pub fn dropped_options(config: &TableConfig, dialect: Dialect) -> Vec<&'static str> {
    let mut dropped = Vec::new();

    if !dialect.supports_projection_clauses() {
        if config.order_by.is_some() {
            dropped.push("order_by");
        }
        if config.segmented_by.is_some() {
            dropped.push("segmented_by_string");
        }
        if config.is_unsegmented() {
            dropped.push("no_segmentation");
        }
        if config.ksafe.is_some() {
            dropped.push("ksafe");
        }
    }
    if !dialect.supports_partition_clause() && config.partition_by.is_some() {
        dropped.push("partition_by_string");
    }

    dropped
}
