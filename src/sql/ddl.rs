//! DDL (Data Definition Language) support for table materializations.
//!
//! [`CreateTableAs`] renders a `CREATE TABLE ... AS ( query )` statement
//! with the optional Vertica clauses a [`TableConfig`] asks for.
//!
//! # Examples
//!
//! ```ignore
//! use vmat::ddl::CreateTableAs;
//! use vmat::dialect::Dialect;
//! use vmat::model::TableConfig;
//! use vmat::sql::relation::Relation;
//!
//! let config = TableConfig::new()
//!     .order_by(["event_ts"])
//!     .segmented_by("hash(user_id)")
//!     .ksafe(1);
//!
//! let stmt = CreateTableAs::new(Relation::parse("analytics.public.events")?, "select * from raw_events")
//!     .config(config);
//!
//! println!("{}", stmt.to_sql(Dialect::Vertica));
//! ```
//!
//! # Clause order
//!
//! Clauses are emitted in a fixed order, each only when its option is set:
//!
//! ```text
//! <sql_header>
//! CREATE [LOCAL TEMPORARY] TABLE <relation> [ON COMMIT PRESERVE ROWS]
//! AS ( <query> )
//! [ORDER BY <cols>]
//! [SEGMENTED BY <expr> [ALL NODES]]
//! [UNSEGMENTED ALL NODES]
//! [KSAFE <n>]
//! [PARTITION BY <expr> [GROUP BY <expr>] [ACTIVEPARTITIONCOUNT <n>]]
//! ;
//! ```

use crate::model::table::TableConfig;

use super::dialect::{helpers, Dialect, SqlDialect};
use super::relation::Relation;
use super::token::{Token, TokenStream};

// ============================================================================
// CREATE TABLE AS
// ============================================================================

/// CREATE TABLE AS statement.
#[derive(Debug, Clone)]
#[must_use = "DDL statements have no effect until converted to SQL with to_sql()"]
pub struct CreateTableAs {
    pub relation: Relation,
    pub query: String,
    pub config: TableConfig,
}

impl CreateTableAs {
    /// Create a new statement with every optional clause omitted.
    pub fn new(relation: Relation, query: impl Into<String>) -> Self {
        Self {
            relation,
            query: query.into(),
            config: TableConfig::default(),
        }
    }

    /// Set the materialization options.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Convert to SQL for the given dialect.
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).serialize(&dialect)
    }

    /// Convert to token stream.
    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let cfg = &self.config;
        let mut ts = TokenStream::new();

        if let Some(header) = header_clause(cfg) {
            ts.append(&header);
        }

        ts.append(&create_clause(cfg, &self.relation))
            .space()
            .append(&as_clause(&self.query));

        if dialect.supports_projection_clauses() {
            let projection = [
                order_by_clause(cfg),
                segmented_by_clause(cfg),
                unsegmented_clause(cfg),
                ksafe_clause(cfg),
            ];
            for clause in projection.into_iter().flatten() {
                ts.space().append(&clause);
            }
        }

        if dialect.supports_partition_clause() {
            if let Some(partition) = partition_clause(cfg) {
                ts.space().append(&partition);
            }
        }

        ts.space().push(Token::Semicolon);
        ts
    }
}

// ============================================================================
// Clause builders
// ============================================================================

/// Raw header followed by a line break.
pub fn header_clause(cfg: &TableConfig) -> Option<TokenStream> {
    let header = cfg.sql_header.as_ref()?;
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(header.clone())).newline();
    Some(ts)
}

/// `CREATE [LOCAL TEMPORARY] TABLE <relation> [ON COMMIT PRESERVE ROWS]`.
///
/// Temporary tables live in the session's temp space and are named without
/// database or schema.
pub fn create_clause(cfg: &TableConfig, relation: &Relation) -> TokenStream {
    let temporary = cfg.is_temporary();
    let mut ts = TokenStream::new();

    ts.push(Token::Create).space();
    if temporary {
        ts.push(Token::Local)
            .space()
            .push(Token::Temporary)
            .space();
    }
    ts.push(Token::Table).space();

    if temporary {
        ts.append(&relation.include(false, false).to_tokens());
        ts.space()
            .push(Token::On)
            .space()
            .push(Token::Commit)
            .space()
            .push(Token::Preserve)
            .space()
            .push(Token::Rows);
    } else {
        ts.append(&relation.to_tokens());
    }

    ts
}

/// `AS ( <query> )`.
pub fn as_clause(query: &str) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::As)
        .space()
        .lparen()
        .space()
        .push(Token::Raw(query.to_string()))
        .space()
        .rparen();
    ts
}

/// `ORDER BY a,b`.
pub fn order_by_clause(cfg: &TableConfig) -> Option<TokenStream> {
    let columns = cfg.order_by.as_ref()?;
    let mut ts = TokenStream::new();
    ts.push(Token::OrderBy)
        .space()
        .push(Token::Raw(helpers::join_sort_columns(columns)));
    Some(ts)
}

/// `SEGMENTED BY <expr> [ALL NODES]`.
pub fn segmented_by_clause(cfg: &TableConfig) -> Option<TokenStream> {
    let expr = cfg.segmented_by.as_ref()?;
    let mut ts = TokenStream::new();
    ts.push(Token::SegmentedBy)
        .space()
        .push(Token::Raw(expr.clone()));
    if cfg.segments_all_nodes() {
        ts.space().push(Token::AllNodes);
    }
    Some(ts)
}

/// `UNSEGMENTED ALL NODES`.
///
/// Evaluated independently of [`segmented_by_clause`]: a config carrying
/// both renders both.
pub fn unsegmented_clause(cfg: &TableConfig) -> Option<TokenStream> {
    if !cfg.is_unsegmented() {
        return None;
    }
    let mut ts = TokenStream::new();
    ts.push(Token::Unsegmented).space().push(Token::AllNodes);
    Some(ts)
}

/// `KSAFE <n>`.
pub fn ksafe_clause(cfg: &TableConfig) -> Option<TokenStream> {
    let level = cfg.ksafe?;
    let mut ts = TokenStream::new();
    ts.push(Token::Ksafe)
        .space()
        .push(Token::LitInt(i64::from(level)));
    Some(ts)
}

/// `PARTITION BY <expr> [GROUP BY <expr>] [ACTIVEPARTITIONCOUNT <n>]`.
///
/// Group-by and active count are dropped without a partition expression.
pub fn partition_clause(cfg: &TableConfig) -> Option<TokenStream> {
    let expr = cfg.partition_by.as_ref()?;
    let mut ts = TokenStream::new();
    ts.push(Token::PartitionBy)
        .space()
        .push(Token::Raw(expr.clone()));

    if let Some(ref group_by) = cfg.partition_group_by {
        ts.space()
            .push(Token::GroupBy)
            .space()
            .push(Token::Raw(group_by.clone()));
    }

    if let Some(count) = cfg.active_partition_count {
        ts.space()
            .push(Token::ActivePartitionCount)
            .space()
            .push(Token::LitInt(i64::from(count)));
    }

    Some(ts)
}
