//! Sequential listing pagination
//!
//! Pages are fetched one at a time in increasing order. Pagination is a small
//! state machine so the termination policy can be tested without a network:
//!
//! | State         | Event                  | Next state                 |
//! |---------------|------------------------|----------------------------|
//! | `Fetching(p)` | parsed, 0 entries      | `Done(EmptyPage)`          |
//! | `Fetching(p)` | parsed, n > 0 entries  | `Fetching(p + 1)` or `Done(PageLimit)` past the ceiling |
//! | `Fetching(p)` | fetch or parse fault   | `Done(Fault)`              |
//! | `Done(r)`     | anything               | `Done(r)`                  |
//!
//! A fault keeps everything accumulated so far; there are no retries.

use crate::film::FilmRecord;
use crate::month::YearMonth;
use crate::scrape::fetcher::PageFetcher;
use crate::scrape::parser::{ListingFormat, ParsedPage};
use crate::username::Username;
use url::Url;

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page had no listing entries
    EmptyPage,

    /// A page could not be fetched or parsed
    Fault,

    /// The page ceiling was reached
    PageLimit,
}

/// Outcome of processing one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The page was fetched and parsed; `entries` counts listing entries
    Parsed { entries: usize },

    /// The page could not be fetched or parsed
    Fault,
}

/// Pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// Page number (1-based) to fetch next
    Fetching(u32),

    /// Pagination has finished
    Done(StopReason),
}

impl PaginationState {
    /// Initial state for a listing capped at `max_pages`
    pub fn start(max_pages: u32) -> Self {
        if max_pages == 0 {
            Self::Done(StopReason::PageLimit)
        } else {
            Self::Fetching(1)
        }
    }

    /// Applies a page event
    pub fn advance(self, event: PageEvent, max_pages: u32) -> Self {
        let Self::Fetching(page) = self else {
            return self;
        };

        match event {
            PageEvent::Fault => Self::Done(StopReason::Fault),
            PageEvent::Parsed { entries: 0 } => Self::Done(StopReason::EmptyPage),
            PageEvent::Parsed { .. } if page >= max_pages => Self::Done(StopReason::PageLimit),
            PageEvent::Parsed { .. } => Self::Fetching(page + 1),
        }
    }

    /// Returns true once pagination has stopped
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Everything collected by one pagination run
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Rated films in listing order
    pub films: Vec<FilmRecord>,

    /// Number of page fetches attempted
    pub pages_fetched: u32,

    /// Why pagination ended
    pub stop: StopReason,
}

/// Drives page fetching and parsing for one user listing
pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    format: &'a dyn ListingFormat,
    base_url: &'a Url,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        format: &'a dyn ListingFormat,
        base_url: &'a Url,
        max_pages: u32,
    ) -> Self {
        Self {
            fetcher,
            format,
            base_url,
            max_pages,
        }
    }

    /// Fetches and parses listing pages until the listing ends, a page fails,
    /// or the page ceiling is reached
    ///
    /// Never fails: a fault ends pagination and the films gathered before it
    /// are returned.
    pub async fn fetch_all(&self, username: &Username, month: YearMonth) -> FetchSummary {
        let mut films = Vec::new();
        let mut pages_fetched = 0;
        let mut state = PaginationState::start(self.max_pages);

        while let PaginationState::Fetching(page) = state {
            pages_fetched += 1;
            let event = match self.fetch_page(username, page, month).await {
                Some(parsed) => {
                    let entries = parsed.entries;
                    films.extend(parsed.films);
                    PageEvent::Parsed { entries }
                }
                None => PageEvent::Fault,
            };
            state = state.advance(event, self.max_pages);
        }

        let stop = match state {
            PaginationState::Done(reason) => reason,
            PaginationState::Fetching(_) => StopReason::PageLimit,
        };

        match stop {
            StopReason::EmptyPage => {
                tracing::info!("No more films found on page {}", pages_fetched)
            }
            StopReason::PageLimit => {
                tracing::info!("Stopped at page ceiling of {}", self.max_pages)
            }
            StopReason::Fault => {
                tracing::warn!("Stopped after a failure on page {}", pages_fetched)
            }
        }

        FetchSummary {
            films,
            pages_fetched,
            stop,
        }
    }

    /// Fetches and parses a single page, logging and swallowing failures
    async fn fetch_page(
        &self,
        username: &Username,
        page: u32,
        month: YearMonth,
    ) -> Option<ParsedPage> {
        let url = match self.format.page_url(self.base_url, username, page) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Error building URL for page {}: {}", page, e);
                return None;
            }
        };

        tracing::debug!("Scraping URL: {}", url);

        let body = match self.fetcher.fetch_page(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error scraping page {}: {}", page, e);
                return None;
            }
        };

        match self.format.parse_page(&body, self.base_url, month) {
            Ok(parsed) => {
                tracing::debug!(
                    "Found {} {} entries on page {}",
                    parsed.entries,
                    self.format.name(),
                    page
                );
                Some(parsed)
            }
            Err(e) => {
                tracing::warn!("Error parsing page {}: {}", page, e);
                None
            }
        }
    }
}
