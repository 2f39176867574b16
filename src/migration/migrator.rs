//! Migrator - schema migration orchestration for the ledger dialect

use super::builder::{build_create_constraint, build_create_index, build_create_table};
use super::capability::gate;
use super::dependency_ordering::{missing_dependencies, reorder};
use super::{MigrationError, Operation};
use crate::config::DialectConfig;
use crate::dialect::Dialect;
use crate::executor::LedgerExecutor;
use crate::schema::{Column, ColumnType, Table};
use crate::statement::Statement;
use std::cell::RefCell;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// Drives DDL for a batch of tables against one executor.
///
/// Tables are created idempotently (`IF NOT EXISTS`) in dependency order.
/// Operations an append-only database cannot perform fail with
/// [`MigrationError::NotSupported`] before anything is sent; introspection
/// fails with [`MigrationError::NotImplemented`].
///
/// # Example
///
/// ```rust
/// use ledgerguard::migration::Migrator;
/// use ledgerguard::recording::RecordingExecutor;
/// use ledgerguard::schema::{Column, DataKind, Index, Table};
/// use ledgerguard::ImmudbDialect;
/// use std::sync::Arc;
///
/// let users = Arc::new(
///     Table::new("users")
///         .column(Column::new("id", DataKind::Int).primary_key())
///         .column(Column::new("email", DataKind::String))
///         .index(Index::new("idx_email").on("email").unique()),
/// );
///
/// let executor = RecordingExecutor::new();
/// let dialect = ImmudbDialect::default();
/// Migrator::new(&executor, &dialect).auto_migrate(&[users])?;
/// assert_eq!(executor.tables(), vec!["users"]);
/// # Ok::<(), ledgerguard::migration::MigrationError>(())
/// ```
pub struct Migrator<'a> {
    executor: &'a dyn LedgerExecutor,
    dialect: &'a dyn Dialect,
    create_index_after_create_table: bool,
    table_options: Option<String>,
    materialized: RefCell<Vec<String>>,
}

impl<'a> Migrator<'a> {
    /// Create a migrator with the deferred index policy and no table options.
    pub fn new(executor: &'a dyn LedgerExecutor, dialect: &'a dyn Dialect) -> Self {
        Self {
            executor,
            dialect,
            create_index_after_create_table: true,
            table_options: None,
            materialized: RefCell::new(Vec::new()),
        }
    }

    /// Create a migrator honoring the index policy and table options of `config`.
    pub fn from_config(
        executor: &'a dyn LedgerExecutor,
        dialect: &'a dyn Dialect,
        config: &DialectConfig,
    ) -> Self {
        let mut migrator = Self::new(executor, dialect)
            .create_index_after_create_table(config.create_index_after_create_table);
        migrator.table_options = config.table_options.clone();
        migrator
    }

    /// `true` creates indexes with separate statements after each table,
    /// `false` writes them inline in the `CREATE TABLE` body.
    pub fn create_index_after_create_table(mut self, deferred: bool) -> Self {
        self.create_index_after_create_table = deferred;
        self
    }

    /// Suffix appended verbatim after every `CREATE TABLE (...)`.
    pub fn table_options(mut self, options: impl Into<String>) -> Self {
        self.table_options = Some(options.into());
        self
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Tables created by this migrator so far, in creation order.
    pub fn materialized_tables(&self) -> Vec<String> {
        self.materialized.borrow().clone()
    }

    fn execute(&self, stmt: Statement<'_>) -> Result<u64, MigrationError> {
        log::debug!("{}", stmt.explain());
        let (sql, vars) = stmt.into_parts();
        Ok(self.executor.execute(&sql, &vars)?)
    }

    fn record_materialized(&self, name: &str) {
        let mut materialized = self.materialized.borrow_mut();
        if !materialized.iter().any(|t| t == name) {
            materialized.push(name.to_string());
        }
    }

    /// Create every table (and its indexes), then attach each table's check
    /// constraints and indexes.
    ///
    /// Referenced tables missing from `tables` are created too. The first
    /// failure stops the run; tables created before it stay created.
    pub fn auto_migrate(&self, tables: &[Arc<Table>]) -> Result<(), MigrationError> {
        gate(Operation::AutoMigrate)?;
        for table in reorder(tables, true)? {
            #[cfg(feature = "tracing")]
            let _span = tracing_helpers::migrate_table_span(&table.name).entered();

            self.create_single_table(&table)?;

            for _relationship in &table.relationships {
                for check in &table.checks {
                    self.create_constraint(&table, &check.name)?;
                }
            }

            for index in &table.indexes {
                self.create_index(&table, &index.name)?;
            }
        }
        Ok(())
    }

    /// Create tables in dependency order.
    ///
    /// Only tables in the batch are reordered; references to tables outside
    /// it are logged and left to the caller.
    pub fn create_table(&self, tables: &[Arc<Table>]) -> Result<(), MigrationError> {
        gate(Operation::CreateTable)?;
        for (table, dependency) in missing_dependencies(tables) {
            log::warn!("{table} references {dependency}, which is not part of this batch");
        }
        for table in reorder(tables, false)? {
            #[cfg(feature = "tracing")]
            let _span = tracing_helpers::migrate_table_span(&table.name).entered();

            self.create_single_table(&table)?;
        }
        Ok(())
    }

    fn create_single_table(&self, table: &Table) -> Result<(), MigrationError> {
        let plan = build_create_table(
            self.dialect,
            table,
            !self.create_index_after_create_table,
            self.table_options.as_deref(),
        )?;

        self.execute(plan.statement)?;
        self.record_materialized(&table.name);
        log::info!("table {} is in place", table.name);

        for name in &plan.deferred_indexes {
            self.create_index(table, name)?;
        }
        Ok(())
    }

    /// Create the index `name` declared on `table`.
    pub fn create_index(&self, table: &Table, name: &str) -> Result<(), MigrationError> {
        gate(Operation::CreateIndex)?;
        let stmt = build_create_index(self.dialect, table, name)?;
        self.execute(stmt)?;
        Ok(())
    }

    /// Attach the check constraint `name` declared on `table`.
    pub fn create_constraint(&self, table: &Table, name: &str) -> Result<(), MigrationError> {
        gate(Operation::CreateConstraint)?;
        let stmt = build_create_constraint(self.dialect, table, name)?;
        self.execute(stmt)?;
        Ok(())
    }

    pub fn savepoint(&self, name: &str) -> Result<(), MigrationError> {
        gate(Operation::Savepoint)?;
        self.dialect.savepoint(self.executor, name)
    }

    pub fn rollback_to(&self, name: &str) -> Result<(), MigrationError> {
        gate(Operation::RollbackTo)?;
        self.dialect.rollback_to(self.executor, name)
    }

    // Structurally impossible on an append-only database.

    pub fn drop_table(&self, _tables: &[Arc<Table>]) -> Result<(), MigrationError> {
        gate(Operation::DropTable)
    }

    pub fn rename_table(&self, _old_name: &str, _new_name: &str) -> Result<(), MigrationError> {
        gate(Operation::RenameTable)
    }

    pub fn add_column(&self, _table: &Table, _column: &str) -> Result<(), MigrationError> {
        gate(Operation::AddColumn)
    }

    pub fn alter_column(&self, _table: &Table, _column: &str) -> Result<(), MigrationError> {
        gate(Operation::AlterColumn)
    }

    pub fn drop_column(&self, _table: &Table, _column: &str) -> Result<(), MigrationError> {
        gate(Operation::DropColumn)
    }

    pub fn rename_column(&self, _table: &Table, _old_name: &str, _new_name: &str) -> Result<(), MigrationError> {
        gate(Operation::RenameColumn)
    }

    pub fn rename_index(&self, _table: &Table, _old_name: &str, _new_name: &str) -> Result<(), MigrationError> {
        gate(Operation::RenameIndex)
    }

    pub fn drop_index(&self, _table: &Table, _name: &str) -> Result<(), MigrationError> {
        gate(Operation::DropIndex)
    }

    pub fn drop_constraint(&self, _table: &Table, _name: &str) -> Result<(), MigrationError> {
        gate(Operation::DropConstraint)
    }

    // Introspection, reserved until the ledger exposes a catalog.

    pub fn current_database(&self) -> Result<String, MigrationError> {
        gate(Operation::CurrentDatabase).map(|()| String::new())
    }

    pub fn current_schema(&self, _table: &Table) -> Result<String, MigrationError> {
        gate(Operation::CurrentSchema).map(|()| String::new())
    }

    pub fn get_tables(&self) -> Result<Vec<String>, MigrationError> {
        gate(Operation::GetTables).map(|()| Vec::new())
    }

    pub fn has_table(&self, _table: &Table) -> Result<bool, MigrationError> {
        gate(Operation::HasTable).map(|()| false)
    }

    pub fn has_column(&self, _table: &Table, _column: &str) -> Result<bool, MigrationError> {
        gate(Operation::HasColumn).map(|()| false)
    }

    pub fn column_types(&self, _table: &Table) -> Result<Vec<ColumnType>, MigrationError> {
        gate(Operation::ColumnTypes).map(|()| Vec::new())
    }

    pub fn migrate_column(
        &self,
        _table: &Table,
        _column: &Column,
        _current: &ColumnType,
    ) -> Result<(), MigrationError> {
        gate(Operation::MigrateColumn)
    }

    pub fn has_index(&self, _table: &Table, _name: &str) -> Result<bool, MigrationError> {
        gate(Operation::HasIndex).map(|()| false)
    }

    pub fn has_constraint(&self, _table: &Table, _name: &str) -> Result<bool, MigrationError> {
        gate(Operation::HasConstraint).map(|()| false)
    }
}
