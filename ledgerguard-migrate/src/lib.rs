//! Ledgerguard Migration Library
//!
//! Loads schema files and plans migrations for the `ledgerguard-migrate` CLI.
//! The CLI tool (main.rs) uses this library.

pub mod plan;
pub mod schema_file;
