//! Resolver configuration: command table, script table and delimiters.
//!
//! Tables are ordered sequences, not maps — precedence between keys is
//! configuration order and nothing else.

use serde::{Deserialize, Serialize};

/// Key of the mandatory fallback command.
pub const FALLBACK_KEY: &str = "*";

/// A destination site keyed by a short identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub key: String,
    /// Display name; commands without one stay out of the help listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Destination origin (scheme + host, optional port). Any path on it is
    /// stripped when building search or path redirects.
    pub url: String,
    /// Search path template; `{}` is replaced with the encoded term. Empty
    /// or missing means search mode degrades to the bare url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Accent color applied when this command's site is the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Command {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            url: url.into(),
            search: None,
            color: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A key that fans out to several commands at once.
///
/// Scripts are expected to reference command keys. Nothing prevents a script
/// from naming another script key; such a reference recurses, and a cyclic
/// configuration will not terminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub key: String,
    pub commands: Vec<String>,
}

impl Script {
    pub fn new(key: impl Into<String>, commands: &[&str]) -> Self {
        Self {
            key: key.into(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Commands in precedence order; must contain the `*` fallback.
    pub commands: Vec<Command>,
    #[serde(default)]
    pub scripts: Vec<Script>,
    #[serde(default = "default_search_delimiter")]
    pub search_delimiter: char,
    #[serde(default = "default_path_delimiter")]
    pub path_delimiter: char,
}

fn default_search_delimiter() -> char {
    '\''
}

fn default_path_delimiter() -> char {
    '/'
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            commands: vec![
                Command::new(FALLBACK_KEY, "https://www.google.com").with_search("/search?q={}"),
                Command::new("bin", "https://www.bing.com")
                    .with_name("Bing")
                    .with_search("/search?q={}"),
                Command::new("ddg", "https://duckduckgo.com")
                    .with_name("DuckDuckGo")
                    .with_search("/?q={}"),
                Command::new("eco", "https://www.ecosia.org")
                    .with_name("Ecosia")
                    .with_search("/search?q={}"),
                Command::new("yah", "https://search.yahoo.com")
                    .with_name("Yahoo")
                    .with_search("/search?p={}"),
            ],
            scripts: vec![Script::new("q", &["bin", "yah", "eco", "ddg", "*"])],
            search_delimiter: default_search_delimiter(),
            path_delimiter: default_path_delimiter(),
        }
    }
}
