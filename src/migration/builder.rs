//! DDL statement builder.
//!
//! Builds `CREATE TABLE`, `CREATE INDEX` and `ALTER TABLE ... ADD CONSTRAINT`
//! statements from the schema model. Nothing here executes anything; the
//! migrator decides when a built statement runs.

use super::{MigrationError, Operation};
use crate::dialect::{Dialect, IndexOptionBuilder};
use crate::schema::{Index, Table};
use crate::statement::Statement;

/// A built `CREATE TABLE` plus the indexes queued to run after it.
#[derive(Debug)]
pub struct CreateTablePlan<'d> {
    pub statement: Statement<'d>,
    /// Index names to create once the table exists, in declared order.
    /// Empty under the inline policy.
    pub deferred_indexes: Vec<String>,
}

fn index_options(dialect: &dyn Dialect) -> Result<&dyn IndexOptionBuilder, MigrationError> {
    dialect
        .index_option_builder()
        .ok_or(MigrationError::NotSupported(Operation::CreateIndex))
}

fn write_option_list(stmt: &mut Statement<'_>, options: &[String]) {
    stmt.write_str("(").write_str(&options.join(", ")).write_str(")");
}

/// Build `CREATE TABLE IF NOT EXISTS` for `table`.
///
/// With `inline_indexes` the table's indexes are written into the body;
/// otherwise they are returned in [`CreateTablePlan::deferred_indexes`].
pub fn build_create_table<'d>(
    dialect: &'d dyn Dialect,
    table: &Table,
    inline_indexes: bool,
    table_options: Option<&str>,
) -> Result<CreateTablePlan<'d>, MigrationError> {
    let mut stmt = Statement::new(dialect);
    let mut deferred_indexes = Vec::new();
    let mut has_primary_key_in_data_type = false;

    stmt.write_str("CREATE TABLE IF NOT EXISTS ")
        .write_quoted(&table.name)
        .write_str(" (");

    for column in table.migratable_columns() {
        let data_type = dialect.data_type_of(column);
        has_primary_key_in_data_type |= data_type.to_uppercase().contains("PRIMARY KEY");
        stmt.write_quoted(&column.name)
            .write_str(" ")
            .write_str(&data_type)
            .write_str(",");
    }

    let primary: Vec<&str> = table.primary_columns().map(|c| c.name.as_str()).collect();
    if !has_primary_key_in_data_type && !primary.is_empty() {
        stmt.write_str("PRIMARY KEY ")
            .write_quoted_list(primary)
            .write_str(",");
    }

    for index in &table.indexes {
        if inline_indexes {
            write_inline_index(&mut stmt, dialect, index)?;
        } else {
            deferred_indexes.push(index.name.clone());
        }
    }

    stmt.trim_trailing(',').write_str(")");

    if let Some(options) = table_options {
        stmt.write_str(options);
    }

    Ok(CreateTablePlan {
        statement: stmt,
        deferred_indexes,
    })
}

// Index comments are not supported by the dialect and are never written.
fn write_inline_index(
    stmt: &mut Statement<'_>,
    dialect: &dyn Dialect,
    index: &Index,
) -> Result<(), MigrationError> {
    let options = index_options(dialect)?.build_index_options(&index.options);

    if let Some(class) = index.class.as_deref().filter(|c| !c.is_empty()) {
        stmt.write_str(class).write_str(" ");
    }
    stmt.write_str("INDEX ").write_str(&index.name).write_str(" ");
    write_option_list(stmt, &options);

    if let Some(option) = index.option.as_deref().filter(|o| !o.is_empty()) {
        stmt.write_str(" ").write_str(option);
    }
    stmt.write_str(",");
    Ok(())
}

/// Build `CREATE INDEX IF NOT EXISTS` for the index named `name`.
pub fn build_create_index<'d>(
    dialect: &'d dyn Dialect,
    table: &Table,
    name: &str,
) -> Result<Statement<'d>, MigrationError> {
    let index = table
        .lookup_index(name)
        .ok_or_else(|| MigrationError::IndexNotFound {
            table: table.name.clone(),
            name: name.to_string(),
        })?;
    let options = index_options(dialect)?.build_index_options(&index.options);

    let mut stmt = Statement::new(dialect);
    stmt.write_str("CREATE ");
    if let Some(class) = index.class.as_deref().filter(|c| !c.is_empty()) {
        stmt.write_str(class).write_str(" ");
    }
    stmt.write_str("INDEX IF NOT EXISTS ");

    let concurrently = index
        .option
        .as_deref()
        .is_some_and(|o| o.trim().eq_ignore_ascii_case("CONCURRENTLY"));
    if concurrently {
        stmt.write_str("CONCURRENTLY ");
    }

    stmt.write_str("ON ").write_quoted(&table.name);

    match index.using.as_deref().filter(|u| !u.is_empty()) {
        Some(method) => {
            stmt.write_str(" USING ").write_str(method);
            write_option_list(&mut stmt, &options);
        }
        None => {
            stmt.write_str(" ");
            write_option_list(&mut stmt, &options);
        }
    }

    if let Some(predicate) = index.predicate.as_deref().filter(|p| !p.is_empty()) {
        stmt.write_str(" WHERE ").write_str(predicate);
    }

    Ok(stmt)
}

/// Build `ALTER TABLE ... ADD CONSTRAINT ... CHECK (...)` for the check named `name`.
pub fn build_create_constraint<'d>(
    dialect: &'d dyn Dialect,
    table: &Table,
    name: &str,
) -> Result<Statement<'d>, MigrationError> {
    let check = table
        .lookup_check(name)
        .ok_or_else(|| MigrationError::ConstraintNotFound {
            table: table.name.clone(),
            name: name.to_string(),
        })?;

    let mut stmt = Statement::new(dialect);
    stmt.write_str("ALTER TABLE ")
        .write_quoted(&table.name)
        .write_str(" ADD CONSTRAINT ")
        .write_quoted(&check.name)
        .write_str(" CHECK (")
        .write_str(&check.expression)
        .write_str(")");
    Ok(stmt)
}
