//! Listing scrape module
//!
//! This module contains the fetch and parse side of a query:
//! - HTTP fetching of listing pages
//! - Listing page parsing (poster grid, diary table)
//! - Sequential pagination with its stop policy

mod diary;
mod fetcher;
mod paginator;
mod parser;

pub use diary::{parse_diary_date, DiaryTable};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use paginator::{FetchSummary, PageEvent, PaginationState, Paginator, StopReason};
pub use parser::{
    normalize_poster_url, strip_viewing_markers, ListingFormat, ParseError, ParsedPage, PosterGrid,
};

use crate::config::ListingKind;
use url::Url;

/// Returns the listing strategy for a configured layout
pub fn listing_format(kind: ListingKind) -> Box<dyn ListingFormat> {
    match kind {
        ListingKind::Grid => Box::new(PosterGrid),
        ListingKind::Diary => Box::new(DiaryTable),
    }
}

/// Parses a site root so that relative page paths join beneath it
///
/// `https://example.com/mirror` becomes `https://example.com/mirror/`.
pub fn site_root(base_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
