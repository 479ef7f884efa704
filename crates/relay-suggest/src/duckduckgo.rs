//! DuckDuckGo autocomplete

use async_trait::async_trait;
use serde::Deserialize;

use relay_query::ParsedQuery;

use crate::influencer::{add_search_prefix, Influencer, InfluencerOptions};
use crate::Result;

const AUTOCOMPLETE_URL: &str = "https://duckduckgo.com/ac/";

#[derive(Debug, Deserialize)]
struct AutocompleteEntry {
    phrase: String,
}

/// Async suggestions from the DuckDuckGo autocomplete API.
pub struct DuckDuckGoInfluencer {
    client: reqwest::Client,
    options: InfluencerOptions,
}

impl DuckDuckGoInfluencer {
    pub fn new(options: InfluencerOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            options,
        }
    }
}

#[async_trait]
impl Influencer for DuckDuckGoInfluencer {
    async fn suggestions(&self, parsed: &ParsedQuery) -> Result<Vec<String>> {
        if parsed.query.len() < self.options.min_chars {
            return Ok(Vec::new());
        }

        let entries: Vec<AutocompleteEntry> = self
            .client
            .get(AUTOCOMPLETE_URL)
            .query(&[("q", parsed.query.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let phrases = entries
            .into_iter()
            .map(|entry| entry.phrase)
            .filter(|phrase| phrase.to_lowercase() != parsed.lower)
            .take(self.options.limit)
            .collect();

        Ok(add_search_prefix(phrases, parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_payload_shape() {
        // Payload shape of https://duckduckgo.com/ac/?q=cats
        let payload = r#"[{"phrase":"cats"},{"phrase":"cats the musical"}]"#;
        let entries: Vec<AutocompleteEntry> = serde_json::from_str(payload).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].phrase, "cats the musical");
    }
}
