//! Capability gate and statement plumbing seen from outside the crate.

use ledgerguard::migration::{Capability, MigrationError, Operation};
use ledgerguard::recording::RecordingExecutor;
use ledgerguard::schema::{Column, DataKind, Index, Table};
use ledgerguard::{Dialect, ImmudbDialect, Migrator, Statement};
use std::sync::Arc;

fn ledger_table() -> Arc<Table> {
    Arc::new(
        Table::new("ledger")
            .column(Column::new("id", DataKind::Int).primary_key())
            .column(Column::new("memo", DataKind::String))
            .index(Index::new("idx_memo").on("memo")),
    )
}

#[test]
fn test_destructive_operations_send_nothing() {
    let table = ledger_table();
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    let err = migrator.drop_table(&[Arc::clone(&table)]).unwrap_err();
    assert!(matches!(err, MigrationError::NotSupported(Operation::DropTable)));
    assert_eq!(err.to_string(), "drop table is not supported by an append-only database");

    assert!(matches!(
        migrator.add_column(&table, "note"),
        Err(MigrationError::NotSupported(Operation::AddColumn))
    ));
    assert!(matches!(
        migrator.alter_column(&table, "memo"),
        Err(MigrationError::NotSupported(Operation::AlterColumn))
    ));
    assert!(matches!(
        migrator.rename_index(&table, "idx_memo", "idx_note"),
        Err(MigrationError::NotSupported(Operation::RenameIndex))
    ));
    assert!(matches!(
        migrator.drop_index(&table, "idx_memo"),
        Err(MigrationError::NotSupported(Operation::DropIndex))
    ));

    assert!(exec.statements().is_empty());
}

#[test]
fn test_introspection_is_not_implemented() {
    let table = ledger_table();
    let exec = RecordingExecutor::new();
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    assert!(matches!(migrator.current_database(), Err(MigrationError::NotImplemented(_))));
    assert!(matches!(migrator.get_tables(), Err(MigrationError::NotImplemented(_))));
    assert!(matches!(migrator.has_table(&table), Err(MigrationError::NotImplemented(_))));
    assert!(matches!(migrator.column_types(&table), Err(MigrationError::NotImplemented(_))));
    assert!(matches!(
        migrator.has_index(&table, "idx_memo"),
        Err(MigrationError::NotImplemented(_))
    ));
    assert!(exec.statements().is_empty());
}

#[test]
fn test_not_supported_is_distinct_from_not_implemented() {
    assert_eq!(Operation::DropTable.capability(), Capability::NotSupported);
    assert_eq!(Operation::HasTable.capability(), Capability::NotImplemented);
    assert_eq!(Operation::AutoMigrate.capability(), Capability::Supported);
}

#[test]
fn test_savepoint_passthrough() {
    let exec = RecordingExecutor::new().fail_on("ROLLBACK", "no transaction");
    let dialect = ImmudbDialect::default();
    let migrator = Migrator::new(&exec, &dialect);

    migrator.savepoint("sp1").unwrap();
    migrator.rollback_to("sp1").unwrap();

    assert_eq!(exec.sql(), vec!["SAVEPOINT sp1", "ROLLBACK TO SAVEPOINT sp1"]);
}

#[test]
fn test_placeholders_number_from_one() {
    let dialect = ImmudbDialect::default();
    let mut stmt = Statement::new(&dialect);
    stmt.write_str("SELECT * FROM ledger WHERE id = ")
        .add_var(7i64)
        .write_str(" AND memo = ")
        .add_var("rent")
        .write_str(" OR memo = ")
        .add_var("it's");

    assert_eq!(stmt.sql(), "SELECT * FROM ledger WHERE id = $1 AND memo = $2 OR memo = $3");
    assert_eq!(stmt.vars().len(), 3);
    assert_eq!(
        stmt.explain(),
        r"SELECT * FROM ledger WHERE id = 7 AND memo = 'rent' OR memo = 'it\'s'"
    );
}

#[test]
fn test_explain_leaves_unbound_placeholders() {
    let dialect = ImmudbDialect::default();
    assert_eq!(
        dialect.explain("SELECT $1, $2", &[true.into()]),
        "SELECT true, $2"
    );
}
