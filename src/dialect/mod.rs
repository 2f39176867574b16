//! SQL dialect abstraction.
//!
//! A [`Dialect`] owns everything that differs between target databases:
//! type tokens, bind-variable syntax, identifier quoting, explain rendering
//! and savepoint statements. Optional capabilities are reached through
//! accessor methods returning `Option`; a dialect lacking one simply returns
//! `None` and the migrator turns that into a `NotSupported` error.

pub mod explain;
pub mod immudb;
pub mod type_mapping;

pub use immudb::ImmudbDialect;

use crate::executor::LedgerExecutor;
use crate::migration::MigrationError;
use crate::schema::{Column, IndexOption};
use crate::value::Value;

pub trait Dialect {
    fn name(&self) -> &str;

    /// Full DDL type of a column.
    fn data_type_of(&self, column: &Column) -> String;

    /// Expression used for a column's default value in DML.
    fn default_value_of(&self, column: &Column) -> String;

    /// Write the placeholder for the argument at `position` (1-based).
    fn write_bind_var(&self, out: &mut String, position: usize);

    /// Write `identifier` quoted for this dialect.
    fn quote_to(&self, out: &mut String, identifier: &str);

    /// Render a statement with its arguments inlined, for logs only.
    fn explain(&self, sql: &str, vars: &[Value]) -> String;

    fn savepoint(&self, executor: &dyn LedgerExecutor, name: &str) -> Result<(), MigrationError>;

    fn rollback_to(&self, executor: &dyn LedgerExecutor, name: &str) -> Result<(), MigrationError>;

    /// Inline index option rendering, when the dialect supports it.
    fn index_option_builder(&self) -> Option<&dyn IndexOptionBuilder> {
        None
    }

    fn quote(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len());
        self.quote_to(&mut out, identifier);
        out
    }
}

/// Renders the column list of an index.
pub trait IndexOptionBuilder {
    /// One rendered fragment per option, in declared order.
    fn build_index_options(&self, options: &[IndexOption]) -> Vec<String>;
}
