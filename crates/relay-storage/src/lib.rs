//! RELAY Storage Layer
//!
//! SQLite-based persistence for previously entered queries, which feed the
//! history suggestion source.

mod database;
mod error;
mod history;
mod migrations;

pub use database::Database;
pub use error::StorageError;
pub use history::QueryHistory;

pub type Result<T> = std::result::Result<T, StorageError>;
