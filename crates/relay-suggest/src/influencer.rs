//! The suggestion source trait

use async_trait::async_trait;

use relay_query::ParsedQuery;

use crate::Result;

/// Per-source tuning: cap on produced suggestions and minimum typed
/// characters before the source kicks in.
#[derive(Debug, Clone, Copy)]
pub struct InfluencerOptions {
    pub limit: usize,
    pub min_chars: usize,
}

impl Default for InfluencerOptions {
    fn default() -> Self {
        Self {
            limit: 4,
            min_chars: 0,
        }
    }
}

/// A suggestion source.
#[async_trait]
pub trait Influencer: Send + Sync {
    /// Suggestions for the current parsed query.
    async fn suggestions(&self, parsed: &ParsedQuery) -> Result<Vec<String>>;

    /// Hook invoked when a query is submitted.
    fn record(&self, _parsed: &ParsedQuery) {}
}

/// Prefix suggestions with `key` + delimiter in search mode, so echoing a
/// suggestion back into the address bar resolves through the same command.
pub(crate) fn add_search_prefix(items: Vec<String>, parsed: &ParsedQuery) -> Vec<String> {
    match (&parsed.key, parsed.split) {
        (Some(key), Some(split)) if parsed.is_search() => items
            .into_iter()
            .map(|item| format!("{key}{split}{item}"))
            .collect(),
        _ => items,
    }
}
