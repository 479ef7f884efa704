//! Canned default suggestions

use std::collections::HashMap;

use async_trait::async_trait;

use relay_query::ParsedQuery;

use crate::influencer::{Influencer, InfluencerOptions};
use crate::Result;

/// Static suggestions keyed by the exact raw query.
pub struct DefaultInfluencer {
    defaults: HashMap<String, Vec<String>>,
    options: InfluencerOptions,
}

impl DefaultInfluencer {
    pub fn new(defaults: HashMap<String, Vec<String>>, options: InfluencerOptions) -> Self {
        Self { defaults, options }
    }
}

#[async_trait]
impl Influencer for DefaultInfluencer {
    async fn suggestions(&self, parsed: &ParsedQuery) -> Result<Vec<String>> {
        Ok(self
            .defaults
            .get(&parsed.raw)
            .map(|items| items.iter().take(self.options.limit).cloned().collect())
            .unwrap_or_default())
    }
}
