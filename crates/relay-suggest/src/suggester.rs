//! Suggestion aggregation

use futures_util::future::join_all;

use relay_query::ParsedQuery;

use crate::influencer::Influencer;

/// Fans a parsed query out to every configured influencer and merges the
/// results in influencer order.
pub struct Suggester {
    influencers: Vec<Box<dyn Influencer>>,
    limit: usize,
}

impl Suggester {
    pub fn new(influencers: Vec<Box<dyn Influencer>>, limit: usize) -> Self {
        Self { influencers, limit }
    }

    /// Collect suggestions for a query. A failing source is logged and
    /// skipped, never fatal. An empty query yields nothing.
    pub async fn suggest(&self, parsed: &ParsedQuery) -> Vec<String> {
        if parsed.query.is_empty() {
            return Vec::new();
        }

        let results = join_all(
            self.influencers
                .iter()
                .map(|influencer| influencer.suggestions(parsed)),
        )
        .await;

        let mut suggestions: Vec<String> = Vec::new();
        for result in results {
            match result {
                Ok(items) => {
                    for item in items {
                        if !suggestions.contains(&item) {
                            suggestions.push(item);
                        }
                    }
                }
                Err(e) => tracing::warn!("Suggestion source failed: {e}"),
            }
        }

        suggestions.truncate(self.limit);
        suggestions
    }

    /// Tell every source about a submitted query.
    pub fn success(&self, parsed: &ParsedQuery) {
        for influencer in &self.influencers {
            influencer.record(parsed);
        }
    }
}
