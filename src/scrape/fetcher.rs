//! HTTP fetcher implementation
//!
//! This module provides the page fetch capability used by the paginator:
//! - Building an HTTP client with the configured user agent and timeout
//! - GET requests for listing pages
//! - Classifying failures (timeout, connection, status, content type)
//!
//! No retries happen here. A failed page ends pagination.

use crate::config::ScraperConfig;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Reasons a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Could not build page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Capability to fetch one listing page as HTML text
///
/// The production implementation is [`HttpFetcher`]; tests substitute
/// in-memory fixtures.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The scraper configuration (user agent, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use boxdly::config::ScraperConfig;
/// use boxdly::scrape::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(config.fetch_timeout_ms);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing pages over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from scraper configuration
    pub fn from_config(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is tolerated; a non-HTML one is not
        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.contains("html") {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

/// Maps a reqwest error to a fetch failure kind
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url }
    } else {
        FetchError::Network {
            url,
            message: error.to_string(),
        }
    }
}
