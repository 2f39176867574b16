//! Type mapping from logical column kinds to ledger SQL type tokens.
//!
//! # Type Mapping
//!
//! - bool → `BOOLEAN`
//! - int / uint → `INTEGER` (`INTEGER AUTO_INCREMENT` when auto-increment)
//! - float → `INTEGER`: the ledger has no floating point type, values are
//!   stored truncated
//! - time → `TIMESTAMP`
//! - string → `VARCHAR` / `VARCHAR[n]`
//! - bytes → `BLOB` / `BLOB[n]`
//! - anything else → the raw kind name

use crate::schema::DataKind;

/// Map a logical kind to a dialect type token.
///
/// `size == 0` means unbounded. Never fails: unknown kinds pass through.
pub fn map_type(kind: &DataKind, size: u32, auto_increment: bool) -> String {
    match kind {
        DataKind::Bool => "BOOLEAN".to_string(),
        DataKind::Int | DataKind::Uint => {
            let mut sql_type = "INTEGER".to_string();
            if auto_increment {
                sql_type.push_str(" AUTO_INCREMENT");
            }
            sql_type
        }
        DataKind::Float => "INTEGER".to_string(),
        DataKind::Time => "TIMESTAMP".to_string(),
        DataKind::String => sized("VARCHAR", size),
        DataKind::Bytes => sized("BLOB", size),
        DataKind::Other(raw) => raw.clone(),
    }
}

fn sized(base: &str, size: u32) -> String {
    if size > 0 {
        format!("{base}[{size}]")
    } else {
        base.to_string()
    }
}

/// Declared size, or the configured default for unbounded string/bytes columns.
pub(crate) fn effective_size(kind: &DataKind, size: u32, default_varchar: u32, default_blob: u32) -> u32 {
    match (kind, size) {
        (DataKind::String, 0) => default_varchar,
        (DataKind::Bytes, 0) => default_blob,
        _ => size,
    }
}
