//! Materialization model types.

pub mod table;

pub use table::{ConfigWarning, ModelError, ModelResult, TableConfig};
