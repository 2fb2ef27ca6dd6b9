use serde::Deserialize;

/// Default listing site root
pub const DEFAULT_BASE_URL: &str = "https://letterboxd.com";

/// Default pagination ceiling
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Default per-page fetch timeout (milliseconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Default browser-like user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Boxdly
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

/// Listing scraper configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Root URL of the listing site
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of listing pages fetched per query
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Timeout for a single page fetch (milliseconds)
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// User agent header value
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Which listing layout to scrape
    #[serde(rename = "listing-format", default)]
    pub listing_format: ListingKind,
}

/// Listing page layouts the scraper understands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// Poster grid at `/{user}/films/`; watched dates approximated to the month
    #[default]
    Grid,

    /// Diary table at `/{user}/films/diary/`; carries real watched dates
    Diary,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_pages: default_max_pages(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            user_agent: default_user_agent(),
            listing_format: ListingKind::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
