//! REST client for the Firebase Realtime Database
//!
//! Appends are `POST {database_url}/{path}.json`; the database answers with
//! the generated push id as `{"name": "<id>"}`.

use super::traits::{AppendStore, StoreError};
use crate::config::TuiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Body returned by a successful push
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Client for appending records to the realtime database
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    http: Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    /// Create a new store client
    pub fn new(
        database_url: &str,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            database_url: database_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    /// Create a store client from the loaded configuration
    pub fn from_config(config: &TuiConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.database_url(),
            config.auth_token(),
            config.request_timeout(),
        )
    }

    /// REST endpoint of a collection
    fn collection_url(&self, path: &str) -> Result<String, StoreError> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(StoreError::InvalidPath);
        }
        Ok(format!("{}/{}.json", self.database_url, path))
    }
}

/// Extract the push id from a response body
fn parse_push_response(body: &str) -> Result<String, StoreError> {
    let response: PushResponse = serde_json::from_str(body)?;
    Ok(response.name)
}

#[async_trait]
impl AppendStore for FirebaseStore {
    async fn append(&self, path: &str, record: Value) -> Result<String, StoreError> {
        let url = self.collection_url(path)?;

        let mut request = self.http.post(&url).json(&record);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }

        tracing::debug!("Appending record to {path}");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        parse_push_response(&body)
    }
}
