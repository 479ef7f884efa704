//! Router configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use relay_query::{Command, QueryConfig, Script};

use crate::Result;

/// A suggestion source by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfluencerKind {
    Default,
    History,
    DuckDuckGo,
}

/// One entry of the ordered influencer list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerSpec {
    pub name: InfluencerKind,
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
    #[serde(default)]
    pub min_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Navigate as soon as typed input exactly matches a key.
    pub instant_redirect: bool,
    /// Open resolved queries in a new tab.
    pub new_tab: bool,
    pub search_delimiter: char,
    pub path_delimiter: char,
    pub commands: Vec<Command>,
    pub scripts: Vec<Script>,
    /// Suggestion sources in the order their results are merged.
    pub influencers: Vec<InfluencerSpec>,
    /// Max number of suggestions ever shown.
    pub suggestion_limit: usize,
    /// Canned suggestions per exact query, for the Default influencer.
    pub suggestion_defaults: HashMap<String, Vec<String>>,
    /// Path to the query history database.
    pub database_path: PathBuf,
}

impl AppConfig {
    /// Read a JSON config file, falling back to defaults when it is absent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The resolver's slice of the configuration.
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            commands: self.commands.clone(),
            scripts: self.scripts.clone(),
            search_delimiter: self.search_delimiter,
            path_delimiter: self.path_delimiter,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("RELAY"))
            .unwrap_or_else(|| PathBuf::from(".relay"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let query = QueryConfig::default();

        Self {
            instant_redirect: false,
            new_tab: true,
            search_delimiter: query.search_delimiter,
            path_delimiter: query.path_delimiter,
            commands: query.commands,
            scripts: query.scripts,
            influencers: vec![
                InfluencerSpec {
                    name: InfluencerKind::Default,
                    limit: default_suggestion_limit(),
                    min_chars: 0,
                },
                InfluencerSpec {
                    name: InfluencerKind::History,
                    limit: default_suggestion_limit(),
                    min_chars: 2,
                },
                InfluencerSpec {
                    name: InfluencerKind::DuckDuckGo,
                    limit: default_suggestion_limit(),
                    min_chars: 2,
                },
            ],
            suggestion_limit: default_suggestion_limit(),
            suggestion_defaults: HashMap::new(),
            database_path: Self::data_dir().join("relay.db"),
        }
    }
}

fn default_suggestion_limit() -> usize {
    4
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
