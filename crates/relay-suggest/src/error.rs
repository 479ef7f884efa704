//! Suggestion error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Autocomplete request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] relay_storage::StorageError),
}
