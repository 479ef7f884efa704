//! Query parsing and resolution
//!
//! Precedence: literal URL detection first, then script keys, then command
//! keys, each tested as bare key, search form and path form in table order.
//! Input matching nothing resolves through the `*` command as a plain search
//! for the text as typed.

use serde::Serialize;
use url::Url;

use crate::config::{QueryConfig, Script, FALLBACK_KEY};
use crate::error::QueryError;
use crate::Result;

/// Interaction mode that matched a configured key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Input exactly equals the key.
    Key,
    /// Input is key + search delimiter + term.
    Search,
    /// Input is key + path delimiter + path.
    Path,
}

/// What a resolved query tells the caller to do.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Navigate to a single destination.
    Redirect(String),
    /// Open every nested resolution, in order (scripts).
    Fanout(Vec<ParsedQuery>),
}

/// The result of resolving one input string.
///
/// Built fresh on every [`QueryParser::parse`] call and meant to be consumed
/// immediately; the parser keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuery {
    /// Trimmed original input.
    pub raw: String,
    /// Text after mode-specific stripping: the search term in search mode,
    /// the path in path mode, otherwise `raw`.
    pub query: String,
    /// Lowercase of `query`.
    pub lower: String,
    /// Delimiter the input was split on, if any.
    pub split: Option<char>,
    /// Matched command or script key.
    pub key: Option<String>,
    /// Mode the key matched in.
    pub kind: Option<MatchKind>,
    pub action: Action,
}

impl ParsedQuery {
    pub fn is_key(&self) -> bool {
        self.kind == Some(MatchKind::Key)
    }

    pub fn is_search(&self) -> bool {
        self.kind == Some(MatchKind::Search)
    }

    pub fn is_path(&self) -> bool {
        self.kind == Some(MatchKind::Path)
    }

    /// The single destination, when this is not a fan-out.
    pub fn redirect(&self) -> Option<&str> {
        match &self.action {
            Action::Redirect(url) => Some(url),
            Action::Fanout(_) => None,
        }
    }

    /// Nested resolutions, when this is a fan-out.
    pub fn fanout(&self) -> Option<&[ParsedQuery]> {
        match &self.action {
            Action::Redirect(_) => None,
            Action::Fanout(nested) => Some(nested),
        }
    }

    /// Every destination this resolution navigates to, fan-outs flattened.
    pub fn targets(&self) -> Vec<&str> {
        match &self.action {
            Action::Redirect(url) => vec![url.as_str()],
            Action::Fanout(nested) => nested.iter().flat_map(ParsedQuery::targets).collect(),
        }
    }
}

/// A command with its url validated and origin precomputed.
#[derive(Debug, Clone)]
struct CommandEntry {
    key: String,
    url: String,
    origin: String,
    search: Option<String>,
}

impl CommandEntry {
    /// Redirect for a search term: template against the origin, or the bare
    /// url when no template is configured.
    fn search_redirect(&self, term: &str) -> String {
        match &self.search {
            Some(template) => {
                let encoded = urlencoding::encode(term);
                format!("{}{}", self.origin, template.replace("{}", &encoded))
            }
            None => self.url.clone(),
        }
    }

    /// Redirect for a path suffix appended to the origin.
    fn path_redirect(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path)
    }
}

/// Resolves raw address bar input against the configured tables.
///
/// Construction validates the configuration; resolution itself is a pure,
/// infallible function of the input.
pub struct QueryParser {
    commands: Vec<CommandEntry>,
    scripts: Vec<Script>,
    search_delimiter: char,
    path_delimiter: char,
    fallback: usize,
}

impl QueryParser {
    pub fn new(config: QueryConfig) -> Result<Self> {
        if config.search_delimiter == config.path_delimiter {
            return Err(QueryError::DelimiterClash(config.search_delimiter));
        }

        let mut commands = Vec::with_capacity(config.commands.len());
        for command in &config.commands {
            let parsed = Url::parse(&command.url).map_err(|source| {
                QueryError::InvalidCommandUrl {
                    key: command.key.clone(),
                    source,
                }
            })?;

            if !parsed.has_host() {
                return Err(QueryError::MissingHost(command.key.clone()));
            }

            commands.push(CommandEntry {
                key: command.key.clone(),
                url: command.url.clone(),
                origin: origin_of(&parsed),
                search: command.search.clone().filter(|s| !s.is_empty()),
            });
        }

        let fallback = commands
            .iter()
            .position(|c| c.key == FALLBACK_KEY)
            .ok_or(QueryError::MissingFallback)?;

        tracing::debug!(
            commands = commands.len(),
            scripts = config.scripts.len(),
            "Query parser ready"
        );

        Ok(Self {
            commands,
            scripts: config.scripts,
            search_delimiter: config.search_delimiter,
            path_delimiter: config.path_delimiter,
            fallback,
        })
    }

    /// Resolve one input string.
    pub fn parse(&self, input: &str) -> ParsedQuery {
        let raw = input.trim().to_string();

        // Literal URLs win over every configured key, so typing a bare
        // domain never triggers a command.
        if let Some(redirect) = detect_url(&raw) {
            return ParsedQuery {
                query: raw.clone(),
                lower: raw.to_lowercase(),
                raw,
                split: None,
                key: None,
                kind: None,
                action: Action::Redirect(redirect),
            };
        }

        for script in &self.scripts {
            if raw == script.key {
                let nested = script.commands.iter().map(|key| self.parse(key)).collect();
                return ParsedQuery {
                    query: raw.clone(),
                    lower: raw.to_lowercase(),
                    raw: raw.clone(),
                    split: None,
                    key: Some(script.key.clone()),
                    kind: Some(MatchKind::Key),
                    action: Action::Fanout(nested),
                };
            }

            if let Some(term) = split_key(&raw, &script.key, self.search_delimiter) {
                let nested = script
                    .commands
                    .iter()
                    .map(|key| self.parse(&format!("{}{}{}", key, self.search_delimiter, term)))
                    .collect();
                return ParsedQuery {
                    raw: raw.clone(),
                    lower: term.to_lowercase(),
                    query: term,
                    split: Some(self.search_delimiter),
                    key: Some(script.key.clone()),
                    kind: Some(MatchKind::Search),
                    action: Action::Fanout(nested),
                };
            }

            if let Some(path) = split_key(&raw, &script.key, self.path_delimiter) {
                let nested = script
                    .commands
                    .iter()
                    .map(|key| self.parse(&format!("{}{}{}", key, self.path_delimiter, path)))
                    .collect();
                return ParsedQuery {
                    raw: raw.clone(),
                    lower: path.to_lowercase(),
                    query: path,
                    split: Some(self.path_delimiter),
                    key: Some(script.key.clone()),
                    kind: Some(MatchKind::Path),
                    action: Action::Fanout(nested),
                };
            }
        }

        for command in &self.commands {
            if raw == command.key {
                return ParsedQuery {
                    query: raw.clone(),
                    lower: raw.to_lowercase(),
                    raw: raw.clone(),
                    split: None,
                    key: Some(command.key.clone()),
                    kind: Some(MatchKind::Key),
                    action: Action::Redirect(command.url.clone()),
                };
            }

            if let Some(term) = split_key(&raw, &command.key, self.search_delimiter) {
                return ParsedQuery {
                    raw: raw.clone(),
                    lower: term.to_lowercase(),
                    action: Action::Redirect(command.search_redirect(&term)),
                    query: term,
                    split: Some(self.search_delimiter),
                    key: Some(command.key.clone()),
                    kind: Some(MatchKind::Search),
                };
            }

            if let Some(path) = split_key(&raw, &command.key, self.path_delimiter) {
                return ParsedQuery {
                    raw: raw.clone(),
                    lower: path.to_lowercase(),
                    action: Action::Redirect(command.path_redirect(&path)),
                    query: path,
                    split: Some(self.path_delimiter),
                    key: Some(command.key.clone()),
                    kind: Some(MatchKind::Path),
                };
            }
        }

        // Nothing matched: search the fallback command for the input as
        // typed, not a stripped remainder.
        let fallback = &self.commands[self.fallback];
        ParsedQuery {
            query: raw.clone(),
            lower: raw.to_lowercase(),
            action: Action::Redirect(fallback.search_redirect(&raw)),
            raw,
            split: None,
            key: None,
            kind: None,
        }
    }
}

/// First-segment key match. The input must actually contain the delimiter;
/// a key that is merely a prefix of the first segment does not match.
fn split_key(input: &str, key: &str, delimiter: char) -> Option<String> {
    match input.split_once(delimiter) {
        Some((head, rest)) if head == key => Some(rest.trim().to_string()),
        _ => None,
    }
}

/// Literal URL detection: host-like input becomes a direct navigation
/// target, verbatim when it already carries a scheme, `http://`-prefixed
/// otherwise.
fn detect_url(input: &str) -> Option<String> {
    if !is_host_like(input) {
        return None;
    }

    if has_scheme(input) {
        Some(input.to_string())
    } else {
        Some(format!("http://{input}"))
    }
}

fn has_scheme(input: &str) -> bool {
    match input.find("://") {
        Some(idx) if idx > 0 => input[..idx].chars().all(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Heuristic for "this is a URL, not a query": optional http(s) scheme, two
/// or more dot-separated labels, optional trailing dot, optional port,
/// optional `/`-rooted suffix, no whitespace anywhere.
fn is_host_like(input: &str) -> bool {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return false;
    }

    let rest = strip_http_scheme(input);
    let host_port = match rest.split_once('/') {
        Some((head, _)) => head,
        None => rest,
    };

    let host = match host_port.rsplit_once(':') {
        Some((head, port)) => {
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            head
        }
        None => host_port,
    };

    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();

    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

fn strip_http_scheme(input: &str) -> &str {
    for scheme in ["http://", "https://"] {
        if input.len() >= scheme.len() && input[..scheme.len()].eq_ignore_ascii_case(scheme) {
            return &input[scheme.len()..];
        }
    }
    input
}

/// Scheme + host + non-default port; any path or query on the configured
/// url is dropped.
fn origin_of(url: &Url) -> String {
    let mut origin = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{port}"));
    }
    origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Command, QueryConfig, Script};

    fn parser() -> QueryParser {
        let config = QueryConfig {
            commands: vec![
                Command::new("*", "https://www.google.com").with_search("/search?q={}"),
                Command::new("bin", "https://www.bing.com").with_search("/search?q={}"),
                Command::new("r", "https://reddit.com"),
                Command::new("gh", "https://github.com/trending").with_search("/search?q={}"),
                Command::new("js", "https://www.javascript.com"),
            ],
            scripts: vec![Script::new("q", &["bin", "*"])],
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        QueryParser::new(config).unwrap()
    }

    #[test]
    fn test_literal_url_without_scheme() {
        let result = parser().parse("example.com");
        assert_eq!(result.redirect(), Some("http://example.com"));
        assert!(result.key.is_none());
        assert!(result.kind.is_none());
    }

    #[test]
    fn test_literal_url_with_scheme_is_verbatim() {
        let result = parser().parse("https://example.com/a?b=1");
        assert_eq!(result.redirect(), Some("https://example.com/a?b=1"));
    }

    #[test]
    fn test_literal_url_with_port_and_path() {
        let result = parser().parse("example.com:8080/x/y?z=1#frag");
        assert_eq!(result.redirect(), Some("http://example.com:8080/x/y?z=1#frag"));
    }

    #[test]
    fn test_literal_url_is_a_fixed_point() {
        let p = parser();
        let first = p.parse("example.com");
        let again = p.parse(first.redirect().unwrap());
        assert_eq!(first.redirect(), again.redirect());
    }

    #[test]
    fn test_url_detection_beats_command_matching() {
        // "js" is a command key, but "javascript.com/x" is a URL, and the
        // "r/" path form must not fire for "reddit.com/r/rust" either.
        let p = parser();
        assert_eq!(
            p.parse("javascript.com").redirect(),
            Some("http://javascript.com")
        );
        assert_eq!(
            p.parse("reddit.com/r/rust").redirect(),
            Some("http://reddit.com/r/rust")
        );
    }

    #[test]
    fn test_whitespace_and_single_labels_are_not_urls() {
        let p = parser();
        assert!(p.parse("not a url.com").key.is_none());
        assert_eq!(
            p.parse("not a url.com").redirect(),
            Some("https://www.google.com/search?q=not%20a%20url.com")
        );
        assert_eq!(
            p.parse("localhost").redirect(),
            Some("https://www.google.com/search?q=localhost")
        );
    }

    #[test]
    fn test_bare_key_redirects_to_url() {
        let result = parser().parse("bin");
        assert!(result.is_key());
        assert_eq!(result.key.as_deref(), Some("bin"));
        assert_eq!(result.redirect(), Some("https://www.bing.com"));
    }

    #[test]
    fn test_search_mode() {
        let result = parser().parse("bin'cats");
        assert!(result.is_search());
        assert_eq!(result.key.as_deref(), Some("bin"));
        assert_eq!(result.query, "cats");
        assert_eq!(result.split, Some('\''));
        assert_eq!(result.redirect(), Some("https://www.bing.com/search?q=cats"));
    }

    #[test]
    fn test_search_mode_keeps_later_delimiters_in_the_term() {
        let result = parser().parse("bin'cats'dogs");
        assert_eq!(result.query, "cats'dogs");
        assert_eq!(
            result.redirect(),
            Some("https://www.bing.com/search?q=cats%27dogs")
        );
    }

    #[test]
    fn test_search_mode_trims_the_term() {
        let result = parser().parse("bin'  cats  ");
        assert_eq!(result.query, "cats");
    }

    #[test]
    fn test_trailing_search_delimiter_searches_empty() {
        let result = parser().parse("bin'");
        assert!(result.is_search());
        assert_eq!(result.query, "");
        assert_eq!(result.redirect(), Some("https://www.bing.com/search?q="));
    }

    #[test]
    fn test_search_template_applies_to_origin_not_full_url() {
        // gh's configured url carries a path; the template replaces it.
        let result = parser().parse("gh'rust");
        assert_eq!(result.redirect(), Some("https://github.com/search?q=rust"));
    }

    #[test]
    fn test_search_without_template_degrades_to_url() {
        let result = parser().parse("r'anything");
        assert!(result.is_search());
        assert_eq!(result.redirect(), Some("https://reddit.com"));
    }

    #[test]
    fn test_path_mode() {
        let result = parser().parse("r/r/unixporn");
        assert!(result.is_path());
        assert_eq!(result.key.as_deref(), Some("r"));
        assert_eq!(result.query, "r/unixporn");
        assert_eq!(result.split, Some('/'));
        assert_eq!(result.redirect(), Some("https://reddit.com/r/unixporn"));
    }

    #[test]
    fn test_trailing_path_delimiter_is_path_root() {
        let result = parser().parse("r/");
        assert!(result.is_path());
        assert_eq!(result.query, "");
        assert_eq!(result.redirect(), Some("https://reddit.com/"));
    }

    #[test]
    fn test_fallback_searches_the_entire_input() {
        let result = parser().parse("random text");
        assert!(result.key.is_none());
        assert!(result.kind.is_none());
        assert_eq!(
            result.redirect(),
            Some("https://www.google.com/search?q=random%20text")
        );
    }

    #[test]
    fn test_key_prefix_does_not_match() {
        // "binx" shares a prefix with "bin" but is not it.
        let result = parser().parse("binx'cats");
        assert!(result.key.is_none());
        assert_eq!(
            result.redirect(),
            Some("https://www.google.com/search?q=binx%27cats")
        );
    }

    #[test]
    fn test_table_order_wins_between_duplicate_keys() {
        let config = QueryConfig {
            commands: vec![
                Command::new("*", "https://www.google.com").with_search("/search?q={}"),
                Command::new("x", "https://first.example.com"),
                Command::new("x", "https://second.example.com"),
            ],
            scripts: Vec::new(),
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        let p = QueryParser::new(config).unwrap();
        assert_eq!(p.parse("x").redirect(), Some("https://first.example.com"));
    }

    #[test]
    fn test_script_bare_key_fans_out_in_order() {
        let p = parser();
        let result = p.parse("q");
        assert!(result.is_key());
        assert_eq!(result.key.as_deref(), Some("q"));
        assert!(result.redirect().is_none());

        let nested = result.fanout().unwrap();
        assert_eq!(nested.len(), 2);
        // Each nested entry equals resolving the referenced key directly.
        assert_eq!(nested[0], p.parse("bin"));
        assert_eq!(nested[1], p.parse("*"));
    }

    #[test]
    fn test_script_search_fans_out_searches() {
        let result = parser().parse("q'cats");
        assert!(result.is_search());
        assert_eq!(result.query, "cats");
        assert_eq!(
            result.targets(),
            vec![
                "https://www.bing.com/search?q=cats",
                "https://www.google.com/search?q=cats",
            ]
        );
    }

    #[test]
    fn test_script_path_fans_out_paths() {
        let result = parser().parse("q/foo");
        assert!(result.is_path());
        assert_eq!(
            result.targets(),
            vec!["https://www.bing.com/foo", "https://www.google.com/foo"]
        );
    }

    #[test]
    fn test_script_wins_over_command_with_same_key() {
        let config = QueryConfig {
            commands: vec![
                Command::new("*", "https://www.google.com").with_search("/search?q={}"),
                Command::new("q", "https://example.com"),
            ],
            scripts: vec![Script::new("q", &["*"])],
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        let p = QueryParser::new(config).unwrap();
        assert!(p.parse("q").fanout().is_some());
    }

    #[test]
    fn test_input_is_trimmed() {
        let result = parser().parse("  bin'cats  ");
        assert_eq!(result.raw, "bin'cats");
        assert_eq!(result.redirect(), Some("https://www.bing.com/search?q=cats"));
    }

    #[test]
    fn test_missing_fallback_is_rejected() {
        let config = QueryConfig {
            commands: vec![Command::new("bin", "https://www.bing.com")],
            scripts: Vec::new(),
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        assert!(matches!(
            QueryParser::new(config),
            Err(QueryError::MissingFallback)
        ));
    }

    #[test]
    fn test_identical_delimiters_are_rejected() {
        let config = QueryConfig {
            search_delimiter: '/',
            path_delimiter: '/',
            ..QueryConfig::default()
        };
        assert!(matches!(
            QueryParser::new(config),
            Err(QueryError::DelimiterClash('/'))
        ));
    }

    #[test]
    fn test_malformed_command_url_is_rejected() {
        let config = QueryConfig {
            commands: vec![Command::new("*", "not a url")],
            scripts: Vec::new(),
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        assert!(matches!(
            QueryParser::new(config),
            Err(QueryError::InvalidCommandUrl { .. })
        ));
    }

    #[test]
    fn test_hostless_command_url_is_rejected() {
        let config = QueryConfig {
            commands: vec![Command::new("*", "data:text/plain,hi")],
            scripts: Vec::new(),
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        assert!(matches!(
            QueryParser::new(config),
            Err(QueryError::MissingHost(_))
        ));
    }

    #[test]
    fn test_origin_keeps_non_default_port() {
        let config = QueryConfig {
            commands: vec![
                Command::new("*", "https://www.google.com").with_search("/search?q={}"),
                Command::new("dev", "http://devbox.local.example:3000/dashboard")
                    .with_search("/find?q={}"),
            ],
            scripts: Vec::new(),
            search_delimiter: '\'',
            path_delimiter: '/',
        };
        let p = QueryParser::new(config).unwrap();
        assert_eq!(
            p.parse("dev'metrics").redirect(),
            Some("http://devbox.local.example:3000/find?q=metrics")
        );
        assert_eq!(
            p.parse("dev/status").redirect(),
            Some("http://devbox.local.example:3000/status")
        );
    }
}
