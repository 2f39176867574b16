//! Dry-run planning
//!
//! Runs AutoMigrate against a [`RecordingExecutor`] so the statements an
//! `apply` would send can be shown without touching a ledger.

use ledgerguard::recording::{RecordedStatement, RecordingExecutor};
use ledgerguard::schema::Table;
use ledgerguard::{DialectConfig, ImmudbDialect, MigrationError, Migrator};
use std::sync::Arc;

/// Statements AutoMigrate would send for `tables`, in execution order.
pub fn plan(tables: &[Arc<Table>], config: &DialectConfig) -> Result<Vec<RecordedStatement>, MigrationError> {
    let executor = RecordingExecutor::new();
    let dialect = ImmudbDialect::new(config);
    Migrator::from_config(&executor, &dialect, config).auto_migrate(tables)?;
    Ok(executor.statements())
}
