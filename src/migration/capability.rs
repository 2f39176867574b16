//! Capability gate for schema operations against an append-only target.
//!
//! Every migrator operation is classified here, in one place:
//!
//! - [`Capability::Supported`]: the migrator builds and executes DDL for it.
//! - [`Capability::NotSupported`]: structurally impossible on an immutable
//!   ledger (drops, renames, column changes). Never retried, never degraded.
//! - [`Capability::NotImplemented`]: reserved for a future release
//!   (introspection). Callers must treat the error as fatal to the call.

use super::MigrationError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Supported,
    NotSupported,
    NotImplemented,
}

/// Schema operations known to the migrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AutoMigrate,
    CreateTable,
    CreateIndex,
    CreateConstraint,
    Savepoint,
    RollbackTo,

    DropTable,
    RenameTable,
    AddColumn,
    AlterColumn,
    DropColumn,
    RenameColumn,
    RenameIndex,
    DropIndex,
    DropConstraint,

    CurrentDatabase,
    CurrentSchema,
    GetTables,
    HasTable,
    HasColumn,
    ColumnTypes,
    MigrateColumn,
    HasIndex,
    HasConstraint,
    DecimalSize,
}

impl Operation {
    pub fn capability(self) -> Capability {
        use Operation::*;
        match self {
            AutoMigrate | CreateTable | CreateIndex | CreateConstraint | Savepoint | RollbackTo => {
                Capability::Supported
            }
            DropTable | RenameTable | AddColumn | AlterColumn | DropColumn | RenameColumn
            | RenameIndex | DropIndex | DropConstraint => Capability::NotSupported,
            CurrentDatabase | CurrentSchema | GetTables | HasTable | HasColumn | ColumnTypes
            | MigrateColumn | HasIndex | HasConstraint | DecimalSize => Capability::NotImplemented,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Operation::*;
        match self {
            AutoMigrate => "auto migrate",
            CreateTable => "create table",
            CreateIndex => "create index",
            CreateConstraint => "create constraint",
            Savepoint => "savepoint",
            RollbackTo => "rollback to savepoint",
            DropTable => "drop table",
            RenameTable => "rename table",
            AddColumn => "add column",
            AlterColumn => "alter column",
            DropColumn => "drop column",
            RenameColumn => "rename column",
            RenameIndex => "rename index",
            DropIndex => "drop index",
            DropConstraint => "drop constraint",
            CurrentDatabase => "current database",
            CurrentSchema => "current schema",
            GetTables => "get tables",
            HasTable => "has table",
            HasColumn => "has column",
            ColumnTypes => "column types",
            MigrateColumn => "migrate column",
            HasIndex => "has index",
            HasConstraint => "has constraint",
            DecimalSize => "decimal size",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check an operation against the gate.
///
/// Returns `Ok(())` for supported operations and the matching error otherwise.
pub fn gate(op: Operation) -> Result<(), MigrationError> {
    match op.capability() {
        Capability::Supported => Ok(()),
        Capability::NotSupported => Err(MigrationError::NotSupported(op)),
        Capability::NotImplemented => Err(MigrationError::NotImplemented(op)),
    }
}
