//! Query pipeline: paginate, parse, rank
//!
//! This is the public entry point of the crate. A query validates the caller's
//! input, walks the user's listing pages, and ranks the films of the target
//! month. Upstream failures only shorten the listing; they are never returned
//! as errors.

use crate::config::{validate, Config};
use crate::film::FilmRecord;
use crate::month::YearMonth;
use crate::ranking::rank;
use crate::scrape::{listing_format, site_root, HttpFetcher, ListingFormat, PageFetcher, Paginator};
use crate::username::Username;
use crate::Result;
use url::Url;

/// Top films query over a listing site
///
/// The pipeline holds no per-query state; concurrent queries share nothing but
/// the fetcher.
pub struct ScrapePipeline<F = HttpFetcher> {
    fetcher: F,
    format: Box<dyn ListingFormat>,
    base_url: Url,
    max_pages: u32,
}

impl ScrapePipeline<HttpFetcher> {
    /// Builds a pipeline that fetches over HTTP
    ///
    /// # Example
    ///
    /// ```no_run
    /// use boxdly::{Config, ScrapePipeline, YearMonth};
    ///
    /// # async fn run() -> boxdly::Result<()> {
    /// let pipeline = ScrapePipeline::from_config(&Config::default())?;
    /// let month: YearMonth = "2024-12".parse()?;
    /// for film in pipeline.top_films_for_month("dave", month).await? {
    ///     println!("{} ({})", film.title(), film.star_rating());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.scraper)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> ScrapePipeline<F> {
    /// Builds a pipeline around any fetch capability
    pub fn with_fetcher(config: &Config, fetcher: F) -> Result<Self> {
        validate(config)?;

        Ok(Self {
            fetcher,
            format: listing_format(config.scraper.listing_format),
            base_url: site_root(&config.scraper.base_url)?,
            max_pages: config.scraper.max_pages,
        })
    }

    /// Top rated films of the current month
    pub async fn top_films(&self, username: &str) -> Result<Vec<FilmRecord>> {
        self.query(username, None).await
    }

    /// Top rated films of `month`
    pub async fn top_films_for_month(
        &self,
        username: &str,
        month: YearMonth,
    ) -> Result<Vec<FilmRecord>> {
        self.query(username, Some(month)).await
    }

    /// Returns up to four films watched in `month` (default: the current
    /// month), best rated first
    ///
    /// Only an invalid username is an error. An empty result is a normal
    /// outcome.
    pub async fn query(
        &self,
        username: &str,
        month: Option<YearMonth>,
    ) -> Result<Vec<FilmRecord>> {
        let username = Username::parse(username)?;
        let month = month.unwrap_or_else(YearMonth::current);

        tracing::info!("Fetching films for user: {} for month: {}", username, month);

        let paginator = Paginator::new(
            &self.fetcher,
            self.format.as_ref(),
            &self.base_url,
            self.max_pages,
        );
        let summary = paginator.fetch_all(&username, month).await;

        tracing::info!(
            "Collected {} rated films from {} pages ({:?})",
            summary.films.len(),
            summary.pages_fetched,
            summary.stop
        );

        Ok(rank(summary.films, month))
    }
}
