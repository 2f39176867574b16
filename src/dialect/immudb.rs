//! The immudb SQL dialect.

use super::explain::explain_sql;
use super::type_mapping::{effective_size, map_type};
use super::{Dialect, IndexOptionBuilder};
use crate::config::DialectConfig;
use crate::executor::LedgerExecutor;
use crate::migration::MigrationError;
use crate::schema::{Column, IndexOption};
use crate::value::Value;

/// Dialect for immudb's append-only SQL engine.
///
/// Identifiers are written as-is, placeholders are `$n`.
#[derive(Debug, Clone, Default)]
pub struct ImmudbDialect {
    default_varchar_size: u32,
    default_blob_size: u32,
}

impl ImmudbDialect {
    pub fn new(config: &DialectConfig) -> Self {
        Self {
            default_varchar_size: config.default_varchar_size,
            default_blob_size: config.default_blob_size,
        }
    }

    fn run_passthrough(&self, executor: &dyn LedgerExecutor, sql: &str) {
        log::debug!("{sql}");
        // The statement result belongs to the caller's connection; nothing is
        // fabricated here.
        if let Err(e) = executor.execute(sql, &[]) {
            log::warn!("{sql} failed: {e}");
        }
    }
}

impl Dialect for ImmudbDialect {
    fn name(&self) -> &str {
        "immudb"
    }

    fn data_type_of(&self, column: &Column) -> String {
        let size = effective_size(
            &column.kind,
            column.size,
            self.default_varchar_size,
            self.default_blob_size,
        );
        map_type(&column.kind, size, column.auto_increment)
    }

    fn default_value_of(&self, _column: &Column) -> String {
        "DEFAULT".to_string()
    }

    fn write_bind_var(&self, out: &mut String, position: usize) {
        out.push('$');
        out.push_str(&position.to_string());
    }

    fn quote_to(&self, out: &mut String, identifier: &str) {
        out.push_str(identifier);
    }

    fn explain(&self, sql: &str, vars: &[Value]) -> String {
        explain_sql(sql, '\'', vars)
    }

    fn savepoint(&self, executor: &dyn LedgerExecutor, name: &str) -> Result<(), MigrationError> {
        self.run_passthrough(executor, &format!("SAVEPOINT {name}"));
        Ok(())
    }

    fn rollback_to(&self, executor: &dyn LedgerExecutor, name: &str) -> Result<(), MigrationError> {
        self.run_passthrough(executor, &format!("ROLLBACK TO SAVEPOINT {name}"));
        Ok(())
    }

    fn index_option_builder(&self) -> Option<&dyn IndexOptionBuilder> {
        Some(self)
    }
}

impl IndexOptionBuilder for ImmudbDialect {
    fn build_index_options(&self, options: &[IndexOption]) -> Vec<String> {
        options
            .iter()
            .map(|opt| {
                let mut fragment = match &opt.expression {
                    Some(expr) if !expr.is_empty() => expr.clone(),
                    _ => self.quote(&opt.column),
                };
                if let Some(collate) = opt.collate.as_deref().filter(|c| !c.is_empty()) {
                    fragment.push_str(" COLLATE ");
                    fragment.push_str(collate);
                }
                if let Some(sort) = opt.sort.as_deref().filter(|s| !s.is_empty()) {
                    fragment.push(' ');
                    fragment.push_str(sort);
                }
                fragment
            })
            .collect()
    }
}
