//! Statement accumulator: SQL text plus positional arguments.
//!
//! A `Statement` is created fresh for every table the migrator touches, so
//! arguments never leak from one table's build into the next.

use crate::dialect::Dialect;
use crate::value::Value;
use std::fmt;

pub struct Statement<'d> {
    dialect: &'d dyn Dialect,
    sql: String,
    vars: Vec<Value>,
}

impl<'d> Statement<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            vars: Vec::new(),
        }
    }

    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Append a literal SQL fragment.
    pub fn write_str(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Append an identifier quoted by the dialect.
    pub fn write_quoted(&mut self, identifier: &str) -> &mut Self {
        self.dialect.quote_to(&mut self.sql, identifier);
        self
    }

    /// Append `(a, b, ...)` with every identifier quoted.
    pub fn write_quoted_list<'a>(&mut self, identifiers: impl IntoIterator<Item = &'a str>) -> &mut Self {
        self.sql.push('(');
        for (i, ident) in identifiers.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.dialect.quote_to(&mut self.sql, ident);
        }
        self.sql.push(')');
        self
    }

    /// Bind a value: the argument is stored first, then its placeholder is
    /// written with the new argument count, so the first bound value is `$1`.
    pub fn add_var(&mut self, value: impl Into<Value>) -> &mut Self {
        self.vars.push(value.into());
        self.dialect.write_bind_var(&mut self.sql, self.vars.len());
        self
    }

    /// Drop a trailing separator, if present.
    pub fn trim_trailing(&mut self, separator: char) -> &mut Self {
        if self.sql.ends_with(separator) {
            self.sql.pop();
        }
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn vars(&self) -> &[Value] {
        &self.vars
    }

    /// The statement rendered with its arguments inlined, for logs.
    pub fn explain(&self) -> String {
        self.dialect.explain(&self.sql, &self.vars)
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.vars)
    }
}

impl fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("dialect", &self.dialect.name())
            .field("sql", &self.sql)
            .field("vars", &self.vars)
            .finish()
    }
}
