use crate::config::types::{Config, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound accepted for `max-pages`
const MAX_PAGES_LIMIT: u32 = 100;

/// Lower bound accepted for `fetch-timeout-ms`
const MIN_FETCH_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.max_pages < 1 || config.max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_LIMIT, config.max_pages
        )));
    }

    if config.fetch_timeout_ms < MIN_FETCH_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_ms must be >= {}ms, got {}ms",
            MIN_FETCH_TIMEOUT_MS, config.fetch_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site root: absolute, http(s), with a host and no query
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            base_url
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot carry a query or fragment",
            base_url
        )));
    }

    Ok(())
}
