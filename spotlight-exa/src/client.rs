//! Exa.ai API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use spotlight_core::{ContentsOptions, RawResponse, SearchOptions, SimilarOptions};
use tracing::{debug, info, instrument};

use crate::backend::SearchBackend;
use crate::error::ExaError;
use crate::types::{ExaAnswerRequest, ExaFindSimilarRequest, ExaSearchRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`ExaClient`], built once at startup
#[derive(Debug, Clone)]
pub struct ExaConfig {
    /// Value of the `x-api-key` header
    pub api_key: String,
    /// API root, without a trailing slash
    pub base_url: String,
    /// Upper bound on each call, connect included
    pub timeout: Duration,
}

impl ExaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Exa.ai API client
#[derive(Debug, Clone)]
pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    /// Create a client from validated settings
    pub fn new(config: &ExaConfig) -> Result<Self, ExaError> {
        if config.api_key.trim().is_empty() {
            return Err(ExaError::InvalidConfig("API key is empty".to_string()));
        }

        url::Url::parse(&config.base_url).map_err(|e| {
            ExaError::InvalidConfig(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExaError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and classify the response
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<RawResponse, ExaError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ExaError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExaError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExaError::ParseError(e.to_string()))?;

        let raw = RawResponse::from_value(value)?;
        debug!(
            "Exa {} returned a {} body",
            path,
            match raw {
                RawResponse::Record(_) => "typed",
                RawResponse::Mapping(_) => "loose",
            }
        );
        Ok(raw)
    }
}

#[async_trait]
impl SearchBackend for ExaClient {
    #[instrument(skip(self, contents, options), fields(num_results = options.num_results))]
    async fn search_with_contents(
        &self,
        query: &str,
        contents: &ContentsOptions,
        options: &SearchOptions,
    ) -> Result<RawResponse, ExaError> {
        let request = ExaSearchRequest {
            query: query.to_string(),
            options: options.clone(),
            contents: contents.clone(),
        };

        info!(
            "Searching Exa: query='{}', start_date={:?}, include={:?}, exclude={:?}",
            query.chars().take(80).collect::<String>(),
            request.options.start_published_date,
            request.options.include_domains,
            request.options.exclude_domains
        );

        self.post("/search", &request).await
    }

    #[instrument(skip(self, contents, options), fields(num_results = options.num_results))]
    async fn find_similar_with_contents(
        &self,
        url: &str,
        contents: &ContentsOptions,
        options: &SimilarOptions,
    ) -> Result<RawResponse, ExaError> {
        let request = ExaFindSimilarRequest {
            url: url.to_string(),
            options: options.clone(),
            contents: contents.clone(),
        };

        self.post("/findSimilar", &request).await
    }

    #[instrument(skip(self))]
    async fn answer(&self, question: &str, include_text: bool) -> Result<RawResponse, ExaError> {
        let request = ExaAnswerRequest {
            query: question.to_string(),
            text: include_text,
        };

        self.post("/answer", &request).await
    }
}
