//! # vmat
//!
//! Typed generation of Vertica `CREATE TABLE AS` statements for table
//! materializations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   TableConfig (TOML / JSON / builder)   Relation, query   │
//! └──────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile]
//! ┌──────────────────────────────────────────────────────────┐
//! │        CreateTableAs (ordered clause builders)            │
//! └──────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [token stream + dialect]
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SQL text                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Connection credentials and session setup for the host that executes
//! the statement live in [`config`].

pub mod compile;
pub mod config;
pub mod model;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::ddl;
pub use sql::dialect;
pub use sql::relation;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        compile_table, compile_table_with, dropped_options, CompileError, CompileOptions,
        CompileOutput,
    };
    pub use crate::ddl::CreateTableAs;
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::model::{ConfigWarning, ModelError, TableConfig};
    pub use crate::relation::{IncludePolicy, QuotePolicy, Relation};
    pub use crate::token::{Token, TokenStream};
}

// Also export at crate root for convenience
pub use compile::{compile_table, compile_table_with, CompileOptions};
pub use dialect::Dialect;
pub use model::TableConfig;
pub use relation::Relation;
