//! SQL generation module.
//!
//! This module provides a type-safe builder for table materialization DDL.
//! It includes:
//!
//! - [`ddl`] - CREATE TABLE AS with Vertica projection and partition clauses
//! - [`relation`] - Qualified relation names with include/quote policies
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod ddl;
pub mod dialect;
pub mod relation;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use relation::{IncludePolicy, QuotePolicy, Relation, RelationError};
pub use token::{IdentPart, Token, TokenStream};

// Re-export DDL types
pub use ddl::CreateTableAs;
