//! RELAY Suggestion Layer
//!
//! Suggestion sources ("influencers") for the address bar:
//! - `Default` — canned suggestions for exact queries (sync)
//! - `History` — previously entered queries (sync, SQLite-backed)
//! - `DuckDuckGo` — the DuckDuckGo autocomplete API (async)
//!
//! A [`Suggester`] fans a parsed query out to every configured source and
//! merges the results.

mod default;
mod duckduckgo;
mod error;
mod history;
mod influencer;
mod suggester;

pub use default::DefaultInfluencer;
pub use duckduckgo::DuckDuckGoInfluencer;
pub use error::SuggestError;
pub use history::HistoryInfluencer;
pub use influencer::{Influencer, InfluencerOptions};
pub use suggester::Suggester;

pub type Result<T> = std::result::Result<T, SuggestError>;
