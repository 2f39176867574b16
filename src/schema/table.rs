//! Table definition metadata consumed by the migrator.

use super::{CheckConstraint, Column, Index};
use std::sync::Arc;

/// A relationship owned by a table: the owning table holds the reference and
/// therefore has to be created after the referenced one.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub name: String,
    pub references: Arc<Table>,
}

impl Relationship {
    pub fn new(name: impl Into<String>, references: Arc<Table>) -> Self {
        Self {
            name: name.into(),
            references,
        }
    }
}

/// A logical table.
///
/// Built once from host metadata before a migration run and never mutated
/// while the run is in progress.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub checks: Vec<CheckConstraint>,
    pub relationships: Vec<Relationship>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn check(mut self, check: CheckConstraint) -> Self {
        self.checks.push(check);
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Columns that take part in DDL, in declared order.
    pub fn migratable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.ignore)
    }

    /// Primary key columns, in declared order.
    pub fn primary_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    pub fn lookup_index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|idx| idx.name == name)
    }

    pub fn lookup_check(&self, name: &str) -> Option<&CheckConstraint> {
        self.checks.iter().find(|chk| chk.name == name)
    }

    /// Tables this table must be created after. Self references are skipped.
    pub fn dependencies(&self) -> impl Iterator<Item = &Arc<Table>> {
        self.relationships
            .iter()
            .map(|rel| &rel.references)
            .filter(move |dep| dep.name != self.name)
    }
}
