//! Query resolver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Command table has no `*` fallback command")]
    MissingFallback,

    #[error("Search and path delimiters are both {0:?}")]
    DelimiterClash(char),

    #[error("Invalid url for command {key:?}: {source}")]
    InvalidCommandUrl {
        key: String,
        source: url::ParseError,
    },

    #[error("Url for command {0:?} has no host")]
    MissingHost(String),
}
