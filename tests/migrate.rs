//! End-to-end migration tests against the recording executor.
//!
//! Every statement the migrator sends is captured, so these tests check the
//! exact DDL text, its order, and what the ledger would end up holding.

use ledgerguard::migration::MigrationError;
use ledgerguard::recording::RecordingExecutor;
use ledgerguard::schema::{CheckConstraint, Column, DataKind, Index, IndexOption, Relationship, Table};
use ledgerguard::{DialectConfig, Dialector, ExecError, ImmudbDialect, Migrator};
use std::sync::Arc;

// ============================================================================
// Fixtures
// ============================================================================

fn users() -> Arc<Table> {
    Arc::new(
        Table::new("users")
            .column(Column::new("id", DataKind::Int).primary_key().auto_increment())
            .column(Column::new("email", DataKind::String).size(128))
            .index(Index::new("idx_email").on("email")),
    )
}

fn banks() -> Arc<Table> {
    Arc::new(
        Table::new("banks")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("name", DataKind::String)),
    )
}

fn accounts(banks: &Arc<Table>) -> Arc<Table> {
    Arc::new(
        Table::new("accounts")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("bank_id", DataKind::Int))
            .column(Column::new("balance", DataKind::Float))
            .check(CheckConstraint::new("chk_balance", "balance >= 0"))
            .index(Index::new("idx_bank").on("bank_id"))
            .relationship(Relationship::new("Bank", Arc::clone(banks))),
    )
}

// ============================================================================
// CREATE TABLE
// ============================================================================

#[test]
fn test_users_table_and_deferred_index() {
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_table(&[users()]).unwrap();

    assert_eq!(
        exec.sql(),
        vec![
            "CREATE TABLE IF NOT EXISTS users (id INTEGER AUTO_INCREMENT,email VARCHAR[128],PRIMARY KEY (id))",
            "CREATE INDEX IF NOT EXISTS ON users (email)",
        ]
    );
}

#[test]
fn test_users_with_unique_email_index() {
    let table = Arc::new(
        Table::new("users")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("name", DataKind::String).size(50))
            .column(Column::new("email", DataKind::String))
            .index(Index::new("idx_email").on("email").unique()),
    );
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_table(&[table]).unwrap();

    assert_eq!(
        exec.sql(),
        vec![
            "CREATE TABLE IF NOT EXISTS users (id INTEGER,name VARCHAR[50],email VARCHAR,PRIMARY KEY (id))",
            "CREATE UNIQUE INDEX IF NOT EXISTS ON users (email)",
        ]
    );
}

#[test]
fn test_migration_is_idempotent() {
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    migrator.auto_migrate(&[users()]).unwrap();
    migrator.auto_migrate(&[users()]).unwrap();

    assert_eq!(exec.tables(), vec!["users"]);
    assert_eq!(exec.indexes(), vec!["ON users (email)"]);
    assert!(exec.sql().iter().all(|sql| sql.contains("IF NOT EXISTS")));
}

#[test]
fn test_dependencies_are_created_first() {
    let banks = banks();
    let accounts = accounts(&banks);
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    migrator
        .create_table(&[Arc::clone(&accounts), Arc::clone(&banks)])
        .unwrap();

    let sql = exec.sql();
    let banks_at = sql.iter().position(|s| s.starts_with("CREATE TABLE IF NOT EXISTS banks")).unwrap();
    let accounts_at = sql.iter().position(|s| s.starts_with("CREATE TABLE IF NOT EXISTS accounts")).unwrap();
    assert!(banks_at < accounts_at);
    assert_eq!(migrator.materialized_tables(), vec!["banks", "accounts"]);
}

#[test]
fn test_column_order_and_ignored_columns() {
    let table = Arc::new(
        Table::new("events")
            .column(Column::new("seq", DataKind::Uint).primary_key())
            .column(Column::new("cached", DataKind::String).ignored())
            .column(Column::new("payload", DataKind::Bytes))
            .column(Column::new("ok", DataKind::Bool).nullable())
            .column(Column::new("at", DataKind::Time)),
    );
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_table(&[table]).unwrap();

    assert_eq!(
        exec.sql(),
        vec!["CREATE TABLE IF NOT EXISTS events (seq INTEGER,payload BLOB,ok BOOLEAN,at TIMESTAMP,PRIMARY KEY (seq))"]
    );
}

#[test]
fn test_composite_primary_key_and_float_column() {
    let table = Arc::new(
        Table::new("rates")
            .column(Column::new("currency", DataKind::String).size(3).primary_key())
            .column(Column::new("day", DataKind::Time).primary_key())
            .column(Column::new("rate", DataKind::Float)),
    );
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_table(&[table]).unwrap();

    assert_eq!(
        exec.sql(),
        vec!["CREATE TABLE IF NOT EXISTS rates (currency VARCHAR[3],day TIMESTAMP,rate INTEGER,PRIMARY KEY (currency, day))"]
    );
}

#[test]
fn test_configured_default_sizes() {
    let config = DialectConfig {
        default_varchar_size: 256,
        default_blob_size: 4096,
        ..Default::default()
    };
    let table = Arc::new(
        Table::new("docs")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("title", DataKind::String))
            .column(Column::new("code", DataKind::String).size(8))
            .column(Column::new("body", DataKind::Bytes)),
    );
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::new(&config);

    Migrator::from_config(&exec, &dialect, &config)
        .create_table(&[table])
        .unwrap();

    assert_eq!(
        exec.sql(),
        vec!["CREATE TABLE IF NOT EXISTS docs (id INTEGER,title VARCHAR[256],code VARCHAR[8],body BLOB[4096],PRIMARY KEY (id))"]
    );
}

// ============================================================================
// Indexes and constraints
// ============================================================================

#[test]
fn test_deferred_indexes_follow_declaration_order() {
    let table = Arc::new(
        Table::new("orders")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("customer", DataKind::String))
            .column(Column::new("placed_at", DataKind::Time))
            .index(Index::new("idx_customer").on("customer"))
            .index(
                Index::new("idx_placed")
                    .with_option(IndexOption::column("placed_at").sort("DESC"))
                    .unique(),
            ),
    );
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_table(&[table]).unwrap();

    assert_eq!(
        exec.sql()[1..],
        [
            "CREATE INDEX IF NOT EXISTS ON orders (customer)".to_string(),
            "CREATE UNIQUE INDEX IF NOT EXISTS ON orders (placed_at DESC)".to_string(),
        ]
    );
}

#[test]
fn test_failed_table_skips_its_indexes() {
    let exec = RecordingExecutor::new().fail_on("CREATE TABLE IF NOT EXISTS users", "ledger is read-only");
    let dialect = ImmudbDialect::default();

    let err = Migrator::new(&exec, &dialect).create_table(&[users()]).unwrap_err();

    assert!(matches!(err, MigrationError::Execution(ExecError::QueryError(_))));
    assert_eq!(exec.sql().len(), 1);
    assert!(exec.indexes().is_empty());
}

#[test]
fn test_failure_aborts_remaining_tables() {
    let banks = banks();
    let accounts = accounts(&banks);
    let exec = RecordingExecutor::new().fail_on("CREATE TABLE IF NOT EXISTS banks", "disk full");
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    assert!(migrator.auto_migrate(&[accounts]).is_err());
    assert_eq!(exec.sql().len(), 1);
    assert!(migrator.materialized_tables().is_empty());
}

#[test]
fn test_auto_migrate_full_sequence() {
    let banks = banks();
    let accounts = accounts(&banks);
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect).create_index_after_create_table(false);

    migrator.auto_migrate(&[accounts]).unwrap();

    assert_eq!(
        exec.sql(),
        vec![
            "CREATE TABLE IF NOT EXISTS banks (id INTEGER,name VARCHAR,PRIMARY KEY (id))",
            "CREATE TABLE IF NOT EXISTS accounts (id INTEGER,bank_id INTEGER,balance INTEGER,PRIMARY KEY (id),INDEX idx_bank (bank_id))",
            "ALTER TABLE accounts ADD CONSTRAINT chk_balance CHECK (balance >= 0)",
            "CREATE INDEX IF NOT EXISTS ON accounts (bank_id)",
        ]
    );
}

#[test]
fn test_partial_index_with_method() {
    let table = Table::new("logs")
        .column(Column::new("id", DataKind::Int).primary_key())
        .column(Column::new("level", DataKind::String))
        .index(Index::new("idx_errors").on("level").using("btree").partial("level = 'error'"));
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();

    Migrator::new(&exec, &dialect).create_index(&table, "idx_errors").unwrap();

    assert_eq!(
        exec.sql(),
        vec!["CREATE INDEX IF NOT EXISTS ON logs USING btree(level) WHERE level = 'error'"]
    );
}

#[test]
fn test_unknown_index_and_constraint() {
    let table = users();
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    assert!(matches!(
        migrator.create_index(&table, "idx_missing"),
        Err(MigrationError::IndexNotFound { .. })
    ));
    assert!(matches!(
        migrator.create_constraint(&table, "chk_missing"),
        Err(MigrationError::ConstraintNotFound { .. })
    ));
    assert!(exec.statements().is_empty());
}

// ============================================================================
// Dialector
// ============================================================================

#[test]
fn test_dialector_with_connection() {
    let mut dialector = Dialector::with_connection(
        DialectConfig::default(),
        Box::new(RecordingExecutor::new()),
    );
    dialector.initialize().unwrap();

    let migrator = dialector.migrator().unwrap();
    migrator.auto_migrate(&[users()]).unwrap();
    assert_eq!(migrator.materialized_tables(), vec!["users"]);
}
