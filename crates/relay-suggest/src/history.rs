//! History-backed suggestions

use async_trait::async_trait;

use relay_query::ParsedQuery;
use relay_storage::QueryHistory;

use crate::influencer::{add_search_prefix, Influencer, InfluencerOptions};
use crate::Result;

/// Suggestions from previously entered queries.
pub struct HistoryInfluencer {
    history: QueryHistory,
    options: InfluencerOptions,
}

impl HistoryInfluencer {
    pub fn new(history: QueryHistory, options: InfluencerOptions) -> Self {
        Self { history, options }
    }
}

#[async_trait]
impl Influencer for HistoryInfluencer {
    async fn suggestions(&self, parsed: &ParsedQuery) -> Result<Vec<String>> {
        if parsed.lower.len() < self.options.min_chars {
            return Ok(Vec::new());
        }

        // Over-fetch by one so an exact match can be dropped without
        // shorting the limit.
        let matches = self
            .history
            .matching(&parsed.lower, self.options.limit + 1)?
            .into_iter()
            .filter(|item| item != &parsed.lower)
            .take(self.options.limit)
            .collect();

        Ok(add_search_prefix(matches, parsed))
    }

    fn record(&self, parsed: &ParsedQuery) {
        // Paths are site structure, not queries worth replaying.
        if parsed.is_path() || parsed.lower.len() < self.options.min_chars {
            return;
        }

        if let Err(e) = self.history.record(&parsed.lower) {
            tracing::warn!("Failed to record query history: {e}");
        }
    }
}
