//! Boxdly: monthly top films from a public watch listing
//!
//! This crate scrapes a user's public film listing, decodes the star ratings
//! shown on each poster, keeps the films that belong to one calendar month and
//! returns the four highest rated ones.

pub mod config;
pub mod film;
pub mod month;
pub mod pipeline;
pub mod ranking;
pub mod rating;
pub mod scrape;
pub mod username;

use thiserror::Error;

/// Main error type for Boxdly operations
///
/// Upstream variability (fetch failures, odd markup) never shows up here; it is
/// absorbed by the paginator. Only caller input and environment failures do.
#[derive(Debug, Error)]
pub enum BoxdlyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid username '{username}': {reason}")]
    InvalidUsername { username: String, reason: String },

    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth { value: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Boxdly operations
pub type Result<T> = std::result::Result<T, BoxdlyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use film::FilmRecord;
pub use month::YearMonth;
pub use pipeline::ScrapePipeline;
pub use username::Username;
