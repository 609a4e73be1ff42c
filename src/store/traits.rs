//! Trait abstraction for the append store to enable mocking in tests

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure to append a record
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection path must not be empty")]
    InvalidPath,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store rejected the record ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Append-only, schemaless key-path store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppendStore: Send + Sync {
    /// Append `record` under the collection `path`.
    /// Returns the identifier the store assigned to the new entry.
    async fn append(&self, path: &str, record: Value) -> Result<String, StoreError>;
}
