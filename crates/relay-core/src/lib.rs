//! RELAY Core
//!
//! Configuration loading and top-level coordination for the RELAY query
//! router. The shell around it (rendering, navigation, tab opening) is a
//! consumer concern; this crate stops at resolved target URLs, suggestion
//! lists and presentation metadata.

mod config;
mod error;
mod launcher;
mod theme;

pub use config::{AppConfig, InfluencerKind, InfluencerSpec};
pub use error::CoreError;
pub use launcher::{HelpEntry, Launcher, Submission};

// Re-export core components
pub use relay_query::{
    Action, Command, MatchKind, ParsedQuery, QueryConfig, QueryError, QueryParser, Script,
    FALLBACK_KEY,
};
pub use relay_storage::{Database, QueryHistory, StorageError};
pub use relay_suggest::{
    DefaultInfluencer, DuckDuckGoInfluencer, HistoryInfluencer, Influencer, InfluencerOptions,
    SuggestError, Suggester,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
