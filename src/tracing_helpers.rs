//! `tracing` spans for migration work, enabled by the `tracing` feature.

use tracing::Span;

/// Span covering one table's migration (create, constraints, indexes).
pub fn migrate_table_span(table: &str) -> Span {
    tracing::info_span!("ledgerguard.migrate_table", table = table)
}

/// Span covering a single statement sent to the executor.
pub fn execute_statement_span(sql: &str) -> Span {
    tracing::debug_span!("ledgerguard.execute", sql = sql)
}
