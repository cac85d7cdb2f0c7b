use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::types::{SearchRequest, SearchResponse};
use crate::errors::AppError;
use crate::models::{Candidate, SanctionRecord};
use crate::screening::SanctionsSource;

pub const OFAC_API_BASE: &str = "https://api.ofac-api.com";

#[derive(Debug, Error)]
pub enum OfacClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(StatusCode),

    #[error("provider reported an error: {0}")]
    Provider(String),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<OfacClientError> for AppError {
    fn from(e: OfacClientError) -> Self {
        match e {
            OfacClientError::Decode(e) => AppError::Internal(e.into()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Client for the OFAC sanctions search API.
#[derive(Clone)]
pub struct OfacClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for OfacClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfacClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OfacClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, OfacClientError> {
        Self::with_base_url(OFAC_API_BASE.into(), api_key, timeout)
    }

    /// Point the client at another host (a regional mirror, or a fake in tests).
    pub fn with_base_url(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, OfacClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Search the SDN list for one person and return the first case's matches.
    pub async fn search_person(
        &self,
        candidate: &Candidate,
    ) -> Result<Vec<SanctionRecord>, OfacClientError> {
        let url = format!("{}/v4/search", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&SearchRequest::person(&self.api_key, candidate))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OfacClientError::Status(status));
        }

        // Decode separately from transport so shape problems are told apart.
        let bytes = resp.bytes().await?;
        let data: SearchResponse = serde_json::from_slice(&bytes)?;

        if data.is_error() {
            let message = data
                .error_message
                .clone()
                .unwrap_or_else(|| "Unknown error occurred".into());
            return Err(OfacClientError::Provider(message));
        }

        let records = data
            .into_first_matches()
            .into_iter()
            .map(SanctionRecord::from)
            .collect();
        Ok(records)
    }
}

#[async_trait]
impl SanctionsSource for OfacClient {
    async fn search(&self, candidate: &Candidate) -> Result<Vec<SanctionRecord>, AppError> {
        Ok(self.search_person(candidate).await?)
    }
}
