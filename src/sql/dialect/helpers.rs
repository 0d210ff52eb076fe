//! Shared helper functions for SQL dialect implementations.

/// Quote identifier with double quotes (ANSI style).
/// Used by: Vertica, ANSI
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Join column expressions for a sort key.
///
/// Vertica projection sort keys are emitted without a space after the
/// comma: `ORDER BY a,b`.
pub fn join_sort_columns<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
