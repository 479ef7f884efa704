//! Top-level coordination
//!
//! The launcher owns the validated parser, the suggestion engine and the
//! history database. It resolves input to destinations; navigating to them
//! is the shell's job.

use std::fs;

use serde::Serialize;

use relay_query::{ParsedQuery, QueryParser};
use relay_storage::{Database, QueryHistory};
use relay_suggest::{
    DefaultInfluencer, DuckDuckGoInfluencer, HistoryInfluencer, Influencer, InfluencerOptions,
    Suggester,
};

use crate::config::{AppConfig, InfluencerKind};
use crate::theme;
use crate::Result;

/// A named command for the help listing.
#[derive(Debug, Clone, Serialize)]
pub struct HelpEntry {
    pub key: String,
    pub name: String,
    pub url: String,
}

/// The outcome of submitting a query: where to go and how to open it.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// One entry per destination; scripts produce several.
    pub targets: Vec<String>,
    pub new_tab: bool,
}

pub struct Launcher {
    config: AppConfig,
    parser: QueryParser,
    suggester: Suggester,
}

impl Launcher {
    /// Build a launcher backed by the configured database path.
    pub fn new(config: AppConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Build a launcher over an already-open database.
    pub fn with_database(config: AppConfig, db: Database) -> Result<Self> {
        let parser = QueryParser::new(config.query_config())?;
        let history = QueryHistory::new(db);

        let mut influencers: Vec<Box<dyn Influencer>> = Vec::new();
        for spec in &config.influencers {
            let options = InfluencerOptions {
                limit: spec.limit,
                min_chars: spec.min_chars,
            };

            match spec.name {
                InfluencerKind::Default => influencers.push(Box::new(DefaultInfluencer::new(
                    config.suggestion_defaults.clone(),
                    options,
                ))),
                InfluencerKind::History => influencers.push(Box::new(HistoryInfluencer::new(
                    history.clone(),
                    options,
                ))),
                InfluencerKind::DuckDuckGo => {
                    influencers.push(Box::new(DuckDuckGoInfluencer::new(options)))
                }
            }
        }

        let suggester = Suggester::new(influencers, config.suggestion_limit);

        tracing::info!(
            commands = config.commands.len(),
            scripts = config.scripts.len(),
            influencers = config.influencers.len(),
            "Launcher ready"
        );

        Ok(Self {
            config,
            parser,
            suggester,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve input without side effects.
    pub fn resolve(&self, input: &str) -> ParsedQuery {
        self.parser.parse(input)
    }

    /// Suggestions for partially typed input.
    pub async fn suggest(&self, input: &str) -> Vec<String> {
        let parsed = self.parser.parse(input);
        self.suggester.suggest(&parsed).await
    }

    /// Resolve and commit: feeds the influencers and returns the navigation
    /// targets. Scripts always open in new tabs.
    pub fn submit(&self, input: &str) -> Submission {
        let parsed = self.parser.parse(input);
        self.suggester.success(&parsed);

        let fanout = parsed.fanout().is_some();
        let targets: Vec<String> = parsed.targets().into_iter().map(String::from).collect();

        tracing::debug!(raw = %parsed.raw, targets = targets.len(), "Submitted query");

        Submission {
            targets,
            new_tab: self.config.new_tab || fanout,
        }
    }

    /// Whether typing this exact input should navigate immediately.
    pub fn should_instant_redirect(&self, parsed: &ParsedQuery) -> bool {
        self.config.instant_redirect && parsed.is_key()
    }

    /// Named commands for the help listing; unnamed commands stay hidden.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.config
            .commands
            .iter()
            .filter_map(|command| {
                command.name.as_ref().map(|name| HelpEntry {
                    key: command.key.clone(),
                    name: name.clone(),
                    url: command.url.clone(),
                })
            })
            .collect()
    }

    /// Accent color for a resolution, if its destination belongs to a
    /// colored command. Fan-outs have no single destination and no color.
    pub fn accent_for(&self, parsed: &ParsedQuery) -> Option<String> {
        theme::color_for(&self.config.commands, parsed.redirect()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_query::Command;

    // Drops the DuckDuckGo influencer so tests never reach for the network.
    fn launcher_with(mut config: AppConfig) -> Launcher {
        config
            .influencers
            .retain(|i| i.name != InfluencerKind::DuckDuckGo);
        Launcher::with_database(config, Database::open_in_memory().unwrap()).unwrap()
    }

    fn launcher() -> Launcher {
        launcher_with(AppConfig::default())
    }

    #[test]
    fn test_submit_single_target() {
        let submission = launcher().submit("bin'cats");
        assert_eq!(
            submission.targets,
            vec!["https://www.bing.com/search?q=cats"]
        );
        assert!(submission.new_tab);
    }

    #[test]
    fn test_script_submission_fans_out_and_forces_new_tabs() {
        let launcher = launcher_with(AppConfig {
            new_tab: false,
            ..AppConfig::default()
        });

        // Default script: q -> bin, yah, eco, ddg, *
        let submission = launcher.submit("q'cats");
        assert_eq!(submission.targets.len(), 5);
        assert!(submission.new_tab);

        let single = launcher.submit("bin'cats");
        assert!(!single.new_tab);
    }

    #[tokio::test]
    async fn test_submit_feeds_suggestions() {
        let launcher = launcher();
        launcher.submit("bin'rust iterators");

        let suggestions = launcher.suggest("bin'rust").await;
        assert_eq!(suggestions, vec!["bin'rust iterators"]);
    }

    #[test]
    fn test_instant_redirect_requires_bare_key_match() {
        let launcher = launcher_with(AppConfig {
            instant_redirect: true,
            ..AppConfig::default()
        });

        assert!(launcher.should_instant_redirect(&launcher.resolve("bin")));
        assert!(!launcher.should_instant_redirect(&launcher.resolve("bin'cats")));
        assert!(!launcher.should_instant_redirect(&launcher.resolve("random")));

        let launcher = launcher_with(AppConfig::default());
        assert!(!launcher.should_instant_redirect(&launcher.resolve("bin")));
    }

    #[test]
    fn test_help_lists_only_named_commands() {
        let entries = launcher().help_entries();
        // The fallback has no name and stays hidden.
        assert!(entries.iter().all(|e| e.key != "*"));
        assert!(entries.iter().any(|e| e.name == "DuckDuckGo"));
    }

    #[test]
    fn test_accent_follows_the_destination() {
        let mut config = AppConfig::default();
        config.commands.push(
            Command::new("hn", "https://news.ycombinator.com")
                .with_name("Hacker News")
                .with_color("#ff6600"),
        );
        let launcher = launcher_with(config);

        let bare = launcher.resolve("hn");
        assert_eq!(launcher.accent_for(&bare), Some("#ff6600".to_string()));

        let url = launcher.resolve("news.ycombinator.com/item?id=1");
        assert_eq!(launcher.accent_for(&url), Some("#ff6600".to_string()));

        let script = launcher.resolve("q'cats");
        assert_eq!(launcher.accent_for(&script), None);
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let config = AppConfig {
            commands: vec![Command::new("bin", "https://www.bing.com")],
            ..AppConfig::default()
        };
        let db = Database::open_in_memory().unwrap();
        assert!(Launcher::with_database(config, db).is_err());
    }
}
