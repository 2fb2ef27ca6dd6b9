//! Listing page parsers
//!
//! A [`ListingFormat`] knows where a user's listing pages live and how to turn
//! one page of HTML into film records. [`PosterGrid`] handles the poster grid
//! at `/{user}/films/`; the diary table lives in [`super::diary`].
//!
//! Parsing is tolerant per entry: an entry missing expected structure is
//! dropped and the rest of the page is still parsed.

use crate::film::FilmRecord;
use crate::month::YearMonth;
use crate::rating;
use crate::username::Username;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Page-level parse failure
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result of parsing one listing page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Number of listing entries on the page, kept or not
    pub entries: usize,

    /// Rated films extracted from those entries, in document order
    pub films: Vec<FilmRecord>,
}

impl ParsedPage {
    /// True when the page had no listing entries at all (end of listing)
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// A listing layout: page URLs plus a page parser
pub trait ListingFormat: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// URL of page `page` (1-based) of `username`'s listing
    fn page_url(&self, base: &Url, username: &Username, page: u32)
        -> Result<Url, url::ParseError>;

    /// Parses one fetched page
    ///
    /// `month` is the query month; formats without per-entry dates use it as
    /// the watched date.
    fn parse_page(&self, html: &str, base: &Url, month: YearMonth)
        -> Result<ParsedPage, ParseError>;
}

/// Poster grid listing (`/{user}/films/page/{n}/`)
///
/// Grid entries do not show when a film was watched, so every record gets the
/// first day of the query month as its watched date.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosterGrid;

/// Compiled selectors for the poster grid
struct GridSelectors {
    item: Selector,
    slug: Selector,
    image: Selector,
    viewing_data: Selector,
    year: Selector,
}

impl GridSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            item: compile("ul.poster-list li")?,
            slug: compile("[data-film-slug], [data-item-slug]")?,
            image: compile("img")?,
            viewing_data: compile("p.poster-viewingdata")?,
            year: compile("small.metadata a")?,
        })
    }
}

impl ListingFormat for PosterGrid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn page_url(
        &self,
        base: &Url,
        username: &Username,
        page: u32,
    ) -> Result<Url, url::ParseError> {
        base.join(&format!("{}/films/page/{}/", username, page))
    }

    fn parse_page(
        &self,
        html: &str,
        base: &Url,
        month: YearMonth,
    ) -> Result<ParsedPage, ParseError> {
        let selectors = GridSelectors::new()?;
        let document = Html::parse_document(html);

        let mut page = ParsedPage::default();
        for item in document.select(&selectors.item) {
            page.entries += 1;
            if let Some(film) = parse_grid_item(&item, &selectors, base, month) {
                page.films.push(film);
            }
        }

        tracing::debug!(
            "Grid page: {} entries, {} rated films",
            page.entries,
            page.films.len()
        );
        Ok(page)
    }
}

/// Parses one poster grid entry, returning None if it should be dropped
fn parse_grid_item(
    item: &ElementRef,
    selectors: &GridSelectors,
    base: &Url,
    month: YearMonth,
) -> Option<FilmRecord> {
    let Some(slug) = find_slug(item, selectors) else {
        tracing::debug!("Skipping grid entry without a film slug");
        return None;
    };

    let image = item.select(&selectors.image).next();
    let title = image
        .and_then(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().to_string())
        .unwrap_or_default();
    let poster = image
        .and_then(|img| {
            img.value()
                .attr("src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| img.value().attr("data-src"))
        })
        .unwrap_or("");

    let Some(viewing_data) = item.select(&selectors.viewing_data).next() else {
        tracing::debug!("No viewing data for '{}', skipping", slug);
        return None;
    };
    let viewing_text = element_text(&viewing_data);
    let rating = rating::encode(strip_viewing_markers(&viewing_text));
    tracing::trace!("Viewing data '{}' for '{}' -> {}", viewing_text, slug, rating);
    if rating == 0 {
        tracing::debug!("Skipping unrated film '{}'", slug);
        return None;
    }

    let year = item
        .select(&selectors.year)
        .next()
        .map(|link| element_text(&link))
        .unwrap_or_default();

    let detail_url = match base.join(&format!("film/{}/", slug)) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Bad detail URL for slug '{}': {}", slug, e);
            return None;
        }
    };

    Some(FilmRecord::new(
        title,
        year,
        rating,
        month.first_day(),
        normalize_poster_url(poster, base),
        detail_url.to_string(),
    ))
}

/// Finds the film slug on the entry itself or its first slug-carrying child
fn find_slug<'a>(item: &ElementRef<'a>, selectors: &GridSelectors) -> Option<&'a str> {
    let slug_of = |element: ElementRef<'a>| {
        let value = element.value();
        value
            .attr("data-film-slug")
            .or_else(|| value.attr("data-item-slug"))
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    };

    slug_of(*item).or_else(|| item.select(&selectors.slug).find_map(slug_of))
}

/// Returns the viewing-data text before the first "Watched"/"Liked" marker
///
/// ```
/// use boxdly::scrape::strip_viewing_markers;
///
/// assert_eq!(strip_viewing_markers("★★★ Watched Jan 12"), "★★★");
/// ```
pub fn strip_viewing_markers(text: &str) -> &str {
    let cut = ["Watched", "Liked"]
        .iter()
        .filter_map(|marker| text.find(marker))
        .min()
        .unwrap_or(text.len());
    text[..cut].trim()
}

/// Makes a poster URL absolute
///
/// Protocol-relative URLs get an explicit `https:` scheme and root-relative
/// paths are resolved against the site root. Empty input stays empty.
pub fn normalize_poster_url(raw: &str, base: &Url) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }
    base.join(raw)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Element text with whitespace collapsed
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
