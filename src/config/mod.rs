//! Configuration module for Boxdly
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults.
//!
//! # Example
//!
//! ```no_run
//! use boxdly::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("boxdly.toml")).unwrap();
//! println!("Fetching at most {} pages", config.scraper.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ListingKind, ScraperConfig, DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_MS,
    DEFAULT_MAX_PAGES, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
