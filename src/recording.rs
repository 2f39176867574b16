//! In-memory execution collaborator.
//!
//! `RecordingExecutor` records every statement it receives instead of sending
//! it anywhere. It understands just enough DDL to honor `IF NOT EXISTS` for
//! tables and indexes, so repeated migrations can be checked for duplicates.
//! The CLI uses it for `plan`; the test suites use it everywhere.

use crate::executor::{ExecError, LedgerExecutor};
use crate::value::Value;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// A statement received by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub args: Vec<Value>,
}

#[derive(Default)]
struct Recorded {
    statements: Vec<RecordedStatement>,
    tables: BTreeSet<String>,
    indexes: BTreeSet<String>,
}

#[derive(Default)]
pub struct RecordingExecutor {
    state: Mutex<Recorded>,
    fail_on: Option<(String, String)>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any statement containing `pattern` with a `QueryError` carrying `message`.
    ///
    /// Failed statements are still recorded.
    pub fn fail_on(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.fail_on = Some((pattern.into(), message.into()));
        self
    }

    fn state(&self) -> Result<MutexGuard<'_, Recorded>, ExecError> {
        self.state
            .lock()
            .map_err(|e| ExecError::Other(format!("recording executor poisoned: {e}")))
    }

    /// Every statement received so far, in order.
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.state()
            .map(|s| s.statements.clone())
            .unwrap_or_default()
    }

    /// Statement texts received so far, in order.
    pub fn sql(&self) -> Vec<String> {
        self.statements().into_iter().map(|s| s.sql).collect()
    }

    /// Tables materialized by a `CREATE TABLE IF NOT EXISTS`.
    pub fn tables(&self) -> Vec<String> {
        self.state()
            .map(|s| s.tables.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Indexes materialized by a `CREATE ... INDEX IF NOT EXISTS`, keyed by
    /// their target and column list.
    pub fn indexes(&self) -> Vec<String> {
        self.state()
            .map(|s| s.indexes.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl LedgerExecutor for RecordingExecutor {
    fn execute(&self, query: &str, args: &[Value]) -> Result<u64, ExecError> {
        let mut state = self.state()?;
        state.statements.push(RecordedStatement {
            sql: query.to_string(),
            args: args.to_vec(),
        });

        if let Some((pattern, message)) = &self.fail_on {
            if query.contains(pattern.as_str()) {
                return Err(ExecError::QueryError(message.clone()));
            }
        }

        let created = if let Some(rest) = query.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
            let name = rest.split([' ', '(']).next().unwrap_or_default();
            state.tables.insert(name.to_string())
        } else if let Some((_, target)) = query.split_once("INDEX IF NOT EXISTS ") {
            let target = target.trim_start_matches("CONCURRENTLY ");
            state.indexes.insert(target.trim().to_string())
        } else {
            false
        };

        Ok(u64::from(created))
    }
}
