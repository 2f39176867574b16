//! Schema file loader
//!
//! A schema file is JSON describing tables the way the migrator sees them.
//! Relationships name the referenced table instead of embedding it:
//!
//! ```json
//! {
//!   "tables": [
//!     { "name": "banks", "columns": [{ "name": "id", "kind": "int", "primary_key": true }] },
//!     {
//!       "name": "accounts",
//!       "columns": [
//!         { "name": "id", "kind": "int", "primary_key": true },
//!         { "name": "bank_id", "kind": "int" }
//!       ],
//!       "checks": [{ "name": "chk_bank", "expression": "bank_id > 0" }],
//!       "relationships": [{ "name": "Bank", "references": "banks" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Loading resolves every reference into the shared `Arc<Table>` graph.

use ledgerguard::schema::{CheckConstraint, Column, Index, Relationship, Table};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid schema file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Table {0} is declared more than once")]
    DuplicateTable(String),
    #[error("Table {table} references unknown table {reference}")]
    UnknownTable { table: String, reference: String },
    #[error("Circular relationship: {0}")]
    Cycle(String),
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    tables: Vec<TableSpec>,
}

#[derive(Debug, Deserialize)]
struct TableSpec {
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    indexes: Vec<Index>,
    #[serde(default)]
    checks: Vec<CheckConstraint>,
    #[serde(default)]
    relationships: Vec<RelationshipSpec>,
}

#[derive(Debug, Deserialize)]
struct RelationshipSpec {
    name: String,
    references: String,
}

/// Read and resolve the schema file at `path`.
pub fn load_schema(path: &Path) -> Result<Vec<Arc<Table>>, SchemaFileError> {
    let content = fs::read_to_string(path).map_err(|source| SchemaFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&content)
}

/// Resolve a schema document. Tables come back in file order.
pub fn parse_schema(content: &str) -> Result<Vec<Arc<Table>>, SchemaFileError> {
    let file: SchemaFile = serde_json::from_str(content)?;

    let mut specs: HashMap<&str, &TableSpec> = HashMap::new();
    for spec in &file.tables {
        if specs.insert(spec.name.as_str(), spec).is_some() {
            return Err(SchemaFileError::DuplicateTable(spec.name.clone()));
        }
    }

    let mut resolver = Resolver {
        specs,
        built: HashMap::new(),
        visiting: Vec::new(),
    };
    file.tables
        .iter()
        .map(|spec| resolver.resolve(spec))
        .collect()
}

struct Resolver<'f> {
    specs: HashMap<&'f str, &'f TableSpec>,
    built: HashMap<String, Arc<Table>>,
    visiting: Vec<String>,
}

impl<'f> Resolver<'f> {
    fn resolve(&mut self, spec: &'f TableSpec) -> Result<Arc<Table>, SchemaFileError> {
        if let Some(table) = self.built.get(&spec.name) {
            return Ok(Arc::clone(table));
        }
        if let Some(pos) = self.visiting.iter().position(|name| *name == spec.name) {
            let mut cycle = self.visiting[pos..].to_vec();
            cycle.push(spec.name.clone());
            return Err(SchemaFileError::Cycle(cycle.join(" -> ")));
        }

        self.visiting.push(spec.name.clone());
        let mut relationships = Vec::with_capacity(spec.relationships.len());
        for rel in &spec.relationships {
            let target = self.specs.get(rel.references.as_str()).copied().ok_or_else(|| {
                SchemaFileError::UnknownTable {
                    table: spec.name.clone(),
                    reference: rel.references.clone(),
                }
            })?;
            // Self references need no ordering and cannot be built ahead of the table
            let references = if target.name == spec.name {
                Arc::new(Table::new(spec.name.clone()))
            } else {
                self.resolve(target)?
            };
            relationships.push(Relationship::new(rel.name.clone(), references));
        }
        self.visiting.pop();

        let table = Arc::new(Table {
            name: spec.name.clone(),
            columns: spec.columns.clone(),
            indexes: spec.indexes.clone(),
            checks: spec.checks.clone(),
            relationships,
        });
        self.built.insert(spec.name.clone(), Arc::clone(&table));
        Ok(table)
    }
}
