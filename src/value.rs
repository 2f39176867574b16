//! Positional argument values carried alongside built statements.
//!
//! DDL statements built by the migrator inline their identifiers, so most
//! statements carry no arguments at all. The type still exists because the
//! execution collaborator accepts `(statement, args)` pairs and the explain
//! formatter needs to render literals for diagnostics.

use chrono::NaiveDateTime;
use may_postgres::types::ToSql;
use std::fmt;

static NULL_TEXT: Option<String> = None;

/// A single bound argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Borrow the value as a `may_postgres` parameter.
    pub fn as_sql(&self) -> &dyn ToSql {
        match self {
            Value::Null => &NULL_TEXT,
            Value::Bool(v) => v,
            Value::Int(v) => v,
            Value::Float(v) => v,
            Value::Text(v) => v,
            Value::Bytes(v) => v,
            Value::Timestamp(v) => v,
        }
    }

    /// Render the value as a SQL literal for explain output.
    ///
    /// String-like values are wrapped in `escaper`, with any embedded escaper
    /// backslash-escaped. Byte strings that are not valid UTF-8 render as
    /// `'<binary>'`.
    pub fn to_literal(&self, escaper: char) -> String {
        let quote = |s: &str| {
            let escaped = s.replace(escaper, &format!("\\{escaper}"));
            format!("{escaper}{escaped}{escaper}")
        };
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(v) => quote(v),
            Value::Bytes(v) => match std::str::from_utf8(v) {
                Ok(s) => quote(s),
                Err(_) => quote("<binary>"),
            },
            Value::Timestamp(v) => quote(&v.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal('\''))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
