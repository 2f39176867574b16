//! Column descriptors.

use serde::Deserialize;
use std::fmt;

/// Logical data kind of a column, before dialect mapping.
///
/// Kinds the dialect does not know travel as [`DataKind::Other`] and are
/// passed through to DDL unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DataKind {
    Bool,
    Int,
    Uint,
    Float,
    String,
    Bytes,
    Time,
    Other(String),
}

impl DataKind {
    /// The raw kind name, as it would appear in a schema file.
    pub fn as_str(&self) -> &str {
        match self {
            DataKind::Bool => "bool",
            DataKind::Int => "int",
            DataKind::Uint => "uint",
            DataKind::Float => "float",
            DataKind::String => "string",
            DataKind::Bytes => "bytes",
            DataKind::Time => "time",
            DataKind::Other(raw) => raw,
        }
    }
}

impl From<&str> for DataKind {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "bool" | "boolean" => DataKind::Bool,
            "int" | "integer" => DataKind::Int,
            "uint" => DataKind::Uint,
            "float" => DataKind::Float,
            "string" => DataKind::String,
            "bytes" => DataKind::Bytes,
            "time" | "timestamp" => DataKind::Time,
            _ => DataKind::Other(raw.to_string()),
        }
    }
}

impl From<String> for DataKind {
    fn from(raw: String) -> Self {
        DataKind::from(raw.as_str())
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column as declared by the host schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    /// Column name in the database
    pub name: String,
    /// Logical kind
    pub kind: DataKind,
    /// Declared size, `0` means unbounded / dialect default
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub auto_increment: bool,
    /// Member of the (possibly composite) primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Excluded from DDL entirely
    #[serde(default)]
    pub ignore: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            kind,
            size: 0,
            nullable: false,
            auto_increment: false,
            primary_key: false,
            ignore: false,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}
