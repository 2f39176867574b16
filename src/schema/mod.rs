//! Schema model consumed by the migrator.
//!
//! Producing these descriptors from host-language metadata is the caller's
//! job; the migrator treats them as read-only input.

pub mod column;
pub mod column_type;
pub mod index;
pub mod table;

pub use column::{Column, DataKind};
pub use column_type::ColumnType;
pub use index::{CheckConstraint, Index, IndexOption};
pub use table::{Relationship, Table};
