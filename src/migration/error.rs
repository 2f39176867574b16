//! Migration-specific error types

use super::Operation;
use crate::connection::ConnectionError;
use crate::executor::ExecError;
use thiserror::Error;

/// Migration-specific errors
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The operation cannot exist on an append-only database
    #[error("{0} is not supported by an append-only database")]
    NotSupported(Operation),
    /// The operation is reserved for a future release
    #[error("{0} is not implemented")]
    NotImplemented(Operation),
    /// `create_index` was given a name the table does not declare
    #[error("failed to create index with name {name} on table {table}: no such index")]
    IndexNotFound { table: String, name: String },
    /// `create_constraint` was given a name the table does not declare
    #[error("failed to create constraint with name {name} on table {table}: no such check constraint")]
    ConstraintNotFound { table: String, name: String },
    /// Table dependencies form a cycle
    #[error("circular dependency detected between tables: {0}")]
    CircularDependency(String),
    /// Error from the execution collaborator, passed through untouched
    #[error(transparent)]
    Execution(#[from] ExecError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
