//! Domain models and operation-specific parameter types.
//!
//! The database stores enums as strings (SQLite has no native enums); the
//! typed versions here are the only values the rest of the code handles.
//! Parsing happens at the data-layer boundary.

pub mod config;
pub mod permission;
pub mod ticket;
pub mod transcript;
