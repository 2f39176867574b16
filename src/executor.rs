//! `LedgerExecutor` - the execution collaborator seen by the migrator.
//!
//! The migrator never talks to the network itself: it builds statement text
//! plus positional arguments and hands both to a `LedgerExecutor`. The native
//! implementation drives `may_postgres`, since immudb exposes the PostgreSQL
//! wire protocol; tests and dry runs use [`crate::recording::RecordingExecutor`].

use crate::value::Value;
use may_postgres::types::ToSql;
use may_postgres::{Client, Error as PostgresError};
use std::time::Instant;
use thiserror::Error;

#[cfg(feature = "tracing")]
use crate::tracing_helpers;

/// `LedgerExecutor` error type
#[derive(Debug, Error)]
pub enum ExecError {
    /// Error from `may_postgres`
    #[error("PostgreSQL error: {0}")]
    PostgresError(#[from] PostgresError),
    /// Statement rejected by the executor
    #[error("Query error: {0}")]
    QueryError(String),
    /// Other execution errors
    #[error("Execution error: {0}")]
    Other(String),
}

/// Trait for executing statements against the target database
///
/// Implementations must be usable behind a shared reference; the migrator
/// calls `execute` sequentially from a single caller.
pub trait LedgerExecutor {
    /// Execute a statement and return the number of rows affected
    ///
    /// `query` may contain `$1`, `$2`, ... placeholders matching `args` by position.
    ///
    /// # Errors
    ///
    /// Returns `ExecError` if execution fails. The migrator propagates the
    /// error unchanged.
    fn execute(&self, query: &str, args: &[Value]) -> Result<u64, ExecError>;
}

impl<E: LedgerExecutor + ?Sized> LedgerExecutor for Box<E> {
    fn execute(&self, query: &str, args: &[Value]) -> Result<u64, ExecError> {
        (**self).execute(query, args)
    }
}

impl<E: LedgerExecutor + ?Sized> LedgerExecutor for std::sync::Arc<E> {
    fn execute(&self, query: &str, args: &[Value]) -> Result<u64, ExecError> {
        (**self).execute(query, args)
    }
}

/// Implementation of `LedgerExecutor` for `may_postgres::Client`
pub struct MayPostgresExecutor {
    client: Client,
}

impl MayPostgresExecutor {
    /// Create a new executor from a `may_postgres::Client`
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Consume the executor and return the underlying client
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl LedgerExecutor for MayPostgresExecutor {
    fn execute(&self, query: &str, args: &[Value]) -> Result<u64, ExecError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::execute_statement_span(query).entered();

        let params: Vec<&dyn ToSql> = args.iter().map(Value::as_sql).collect();
        let start = Instant::now();
        let result = self.client.execute(query, &params).map_err(ExecError::from);
        log::trace!("statement finished in {:?}", start.elapsed());

        result
    }
}
