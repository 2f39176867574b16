//! Column type description as reported by introspection.
//!
//! Nothing in the crate produces these yet (introspection is not implemented
//! for the ledger dialect); the type fixes the contract future producers fill.

use crate::migration::{MigrationError, Operation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnType {
    pub name: String,
    pub database_type: String,
    /// `information_schema`-style `"YES"` / `"NO"`, `None` when unknown
    pub nullable: Option<String>,
    pub max_length: Option<i64>,
    pub type_length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
}

impl ColumnType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn database_type_name(&self) -> &str {
        &self.database_type
    }

    /// Declared length, preferring a positive type length over max length.
    ///
    /// Returns `None` when neither source is known.
    pub fn length(&self) -> Option<i64> {
        match self.type_length {
            Some(len) if len > 0 => Some(len),
            _ => self.max_length,
        }
    }

    /// `Some(true)` / `Some(false)` when known, `None` otherwise.
    pub fn nullable(&self) -> Option<bool> {
        self.nullable.as_deref().map(|n| n == "YES")
    }

    /// Precision and scale; decimals are not supported by the dialect yet.
    pub fn decimal_size(&self) -> Result<(i64, i64), MigrationError> {
        Err(MigrationError::NotImplemented(Operation::DecimalSize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_prefers_positive_type_length() {
        let ct = ColumnType {
            type_length: Some(16),
            max_length: Some(255),
            ..Default::default()
        };
        assert_eq!(ct.length(), Some(16));
    }

    #[test]
    fn test_length_falls_back_to_max_length() {
        let ct = ColumnType {
            type_length: Some(0),
            max_length: Some(255),
            ..Default::default()
        };
        assert_eq!(ct.length(), Some(255));

        let unknown = ColumnType {
            type_length: Some(-1),
            ..Default::default()
        };
        assert_eq!(unknown.length(), None);
    }

    #[test]
    fn test_nullable_tri_state() {
        let yes = ColumnType {
            nullable: Some("YES".to_string()),
            ..Default::default()
        };
        let no = ColumnType {
            nullable: Some("NO".to_string()),
            ..Default::default()
        };
        assert_eq!(yes.nullable(), Some(true));
        assert_eq!(no.nullable(), Some(false));
        assert_eq!(ColumnType::default().nullable(), None);
    }

    #[test]
    fn test_decimal_size_not_implemented() {
        let err = ColumnType::default().decimal_size().unwrap_err();
        assert!(matches!(err, MigrationError::NotImplemented(Operation::DecimalSize)));
    }
}
