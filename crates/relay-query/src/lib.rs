//! RELAY Query Resolver
//!
//! Classifies address bar input into one of three targets:
//! 1. Literal URL → navigate directly
//! 2. Command key (bare, search or path form) → one resolved destination
//! 3. Script key → fan-out of command resolutions
//!
//! Input that matches nothing resolves through the `*` fallback command as a
//! free-form search.

mod config;
mod error;
mod parser;

pub use config::{Command, QueryConfig, Script, FALLBACK_KEY};
pub use error::QueryError;
pub use parser::{Action, MatchKind, ParsedQuery, QueryParser};

pub type Result<T> = std::result::Result<T, QueryError>;
