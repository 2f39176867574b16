//! # Ledgerguard
//!
//! Schema migration for immudb, an append-only ledger database that speaks
//! the PostgreSQL wire protocol.
//!
//! Given table descriptors, the [`Migrator`] creates tables idempotently in
//! dependency order, attaches indexes and check constraints, and refuses
//! every operation that would modify or remove existing structure.
//!
//! ```rust
//! use ledgerguard::recording::RecordingExecutor;
//! use ledgerguard::schema::{Column, DataKind, Index, Table};
//! use ledgerguard::{ImmudbDialect, Migrator};
//! use std::sync::Arc;
//!
//! let users = Arc::new(
//!     Table::new("users")
//!         .column(Column::new("id", DataKind::Int).primary_key().auto_increment())
//!         .column(Column::new("email", DataKind::String).size(128))
//!         .index(Index::new("idx_email").on("email")),
//! );
//!
//! let executor = RecordingExecutor::new();
//! let dialect = ImmudbDialect::default();
//! Migrator::new(&executor, &dialect).auto_migrate(&[users])?;
//! assert_eq!(executor.tables(), vec!["users"]);
//! assert_eq!(executor.indexes().len(), 1);
//! # Ok::<(), ledgerguard::MigrationError>(())
//! ```

pub mod config;
pub mod connection;
pub mod dialect;
pub mod dialector;
pub mod executor;
pub mod migration;
pub mod recording;
pub mod schema;
pub mod statement;
pub mod value;

#[cfg(feature = "tracing")]
mod tracing_helpers;

pub use config::DialectConfig;
pub use connection::ConnectionError;
pub use dialect::{Dialect, ImmudbDialect, IndexOptionBuilder};
pub use dialector::Dialector;
pub use executor::{ExecError, LedgerExecutor, MayPostgresExecutor};
pub use migration::{Capability, MigrationError, Migrator, Operation};
pub use statement::Statement;
pub use value::Value;
