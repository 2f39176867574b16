//! Index and check-constraint descriptors.

use serde::Deserialize;

/// One entry of an index's column list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexOption {
    /// Column name, quoted through the dialect when emitted
    #[serde(default)]
    pub column: String,
    /// Raw expression, emitted verbatim in place of the column
    #[serde(default)]
    pub expression: Option<String>,
    /// Sort order, e.g. `DESC`
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub collate: Option<String>,
}

impl IndexOption {
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            column: name.into(),
            expression: None,
            sort: None,
            collate: None,
        }
    }

    pub fn expression(expr: impl Into<String>) -> Self {
        Self {
            column: String::new(),
            expression: Some(expr.into()),
            sort: None,
            collate: None,
        }
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = Some(collate.into());
        self
    }
}

/// Index definition metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Index {
    /// Index name, unique within its table
    pub name: String,
    #[serde(default)]
    pub options: Vec<IndexOption>,
    /// Index class, e.g. `UNIQUE`
    #[serde(default)]
    pub class: Option<String>,
    /// Index method, rendered as `USING <type>(...)`
    #[serde(default, rename = "type")]
    pub using: Option<String>,
    /// Partial index predicate
    #[serde(default, rename = "where")]
    pub predicate: Option<String>,
    /// Creation modifier, e.g. `CONCURRENTLY`
    #[serde(default)]
    pub option: Option<String>,
    /// Never emitted: the ledger dialect has no index comments.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            class: None,
            using: None,
            predicate: None,
            option: None,
            comment: None,
        }
    }

    /// Append a plain column to the index.
    pub fn on(mut self, column: impl Into<String>) -> Self {
        self.options.push(IndexOption::column(column));
        self
    }

    pub fn with_option(mut self, option: IndexOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn unique(mut self) -> Self {
        self.class = Some("UNIQUE".to_string());
        self
    }

    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.using = Some(method.into());
        self
    }

    pub fn partial(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn concurrently(mut self) -> Self {
        self.option = Some("CONCURRENTLY".to_string());
        self
    }
}

/// A named table-level `CHECK` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckConstraint {
    pub name: String,
    /// Raw SQL expression, emitted verbatim inside `CHECK (...)`
    pub expression: String,
}

impl CheckConstraint {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }
}
