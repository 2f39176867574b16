//! Dependency ordering for migration batches
//!
//! A table that owns a relationship must be created after the table it
//! references. This module:
//! - Reorders a batch so dependencies come first, keeping input order otherwise
//! - Optionally pulls referenced tables that are missing from the batch into it
//! - Reports references that point outside the batch
//! - Detects circular dependencies

use super::MigrationError;
use crate::schema::Table;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

struct Reorder {
    auto_add: bool,
    batch: HashMap<String, Arc<Table>>,
    placed: HashSet<String>,
    visiting: Vec<String>,
    ordered: Vec<Arc<Table>>,
}

impl Reorder {
    fn visit(&mut self, table: &Arc<Table>) -> Result<(), MigrationError> {
        if self.placed.contains(&table.name) {
            return Ok(());
        }
        if let Some(pos) = self.visiting.iter().position(|name| *name == table.name) {
            let mut cycle = self.visiting[pos..].to_vec();
            cycle.push(table.name.clone());
            return Err(MigrationError::CircularDependency(cycle.join(" -> ")));
        }

        self.visiting.push(table.name.clone());
        for dep in table.dependencies() {
            // Prefer the batch's own definition when it carries one
            let target = match self.batch.get(&dep.name) {
                Some(in_batch) => Arc::clone(in_batch),
                None if self.auto_add => Arc::clone(dep),
                None => continue,
            };
            self.visit(&target)?;
        }
        self.visiting.pop();

        self.placed.insert(table.name.clone());
        self.ordered.push(Arc::clone(table));
        Ok(())
    }
}

/// Reorder tables so that every table follows the tables it depends on.
///
/// With `auto_add`, referenced tables absent from `tables` are inserted ahead
/// of their dependents. Without it they are ignored. Tables with the same
/// name appear once, at their first position.
pub fn reorder(tables: &[Arc<Table>], auto_add: bool) -> Result<Vec<Arc<Table>>, MigrationError> {
    let mut batch = HashMap::new();
    for table in tables {
        batch
            .entry(table.name.clone())
            .or_insert_with(|| Arc::clone(table));
    }

    let mut state = Reorder {
        auto_add,
        batch,
        placed: HashSet::new(),
        visiting: Vec::new(),
        ordered: Vec::with_capacity(tables.len()),
    };
    for table in tables {
        state.visit(table)?;
    }
    Ok(state.ordered)
}

/// `(table, referenced table)` pairs whose referenced table is not in the batch.
pub fn missing_dependencies(tables: &[Arc<Table>]) -> Vec<(String, String)> {
    let names: HashSet<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    tables
        .iter()
        .flat_map(|table| {
            table
                .dependencies()
                .filter(|dep| !names.contains(dep.name.as_str()))
                .map(|dep| (table.name.clone(), dep.name.clone()))
                .collect::<Vec<_>>()
        })
        .collect()
}
