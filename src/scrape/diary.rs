//! Diary table listing (`/{user}/films/diary/page/{n}/`)
//!
//! Unlike the poster grid, every diary row links to the day the film was
//! logged, so records carry a real watched date.

use crate::film::FilmRecord;
use crate::month::YearMonth;
use crate::rating;
use crate::scrape::parser::{
    compile, element_text, normalize_poster_url, ListingFormat, ParseError, ParsedPage,
};
use crate::username::Username;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Diary table listing format
#[derive(Debug, Clone, Copy, Default)]
pub struct DiaryTable;

struct DiarySelectors {
    row: Selector,
    title: Selector,
    title_fallback: Selector,
    year: Selector,
    year_fallback: Selector,
    rating: Selector,
    rating_fallback: Selector,
    day: Selector,
    day_fallback: Selector,
    image: Selector,
}

impl DiarySelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            row: compile("tr.diary-entry-row")?,
            title: compile("h3.headline-3 a")?,
            title_fallback: compile("td.td-film-details a")?,
            year: compile("small.metadata")?,
            year_fallback: compile("td.td-released")?,
            rating: compile("span.rating")?,
            rating_fallback: compile(".rating")?,
            day: compile("td.td-day a")?,
            day_fallback: compile("a.date-link")?,
            image: compile("img")?,
        })
    }
}

impl ListingFormat for DiaryTable {
    fn name(&self) -> &'static str {
        "diary"
    }

    fn page_url(
        &self,
        base: &Url,
        username: &Username,
        page: u32,
    ) -> Result<Url, url::ParseError> {
        base.join(&format!("{}/films/diary/page/{}/", username, page))
    }

    fn parse_page(
        &self,
        html: &str,
        base: &Url,
        _month: YearMonth,
    ) -> Result<ParsedPage, ParseError> {
        let selectors = DiarySelectors::new()?;
        let document = Html::parse_document(html);

        let mut page = ParsedPage::default();
        for row in document.select(&selectors.row) {
            page.entries += 1;
            if let Some(film) = parse_diary_row(&row, &selectors, base) {
                page.films.push(film);
            }
        }

        tracing::debug!(
            "Diary page: {} rows, {} rated films",
            page.entries,
            page.films.len()
        );
        Ok(page)
    }
}

fn parse_diary_row(row: &ElementRef, selectors: &DiarySelectors, base: &Url) -> Option<FilmRecord> {
    let link = first(row, &selectors.title, &selectors.title_fallback)?;
    let title = element_text(&link);
    let href = link.value().attr("href")?;
    let detail_url = base.join(href).ok()?;

    let rating = first(row, &selectors.rating, &selectors.rating_fallback)
        .map(|span| rating::encode(&element_text(&span)))
        .unwrap_or(0);
    if rating == 0 {
        tracing::debug!("Skipping unrated diary entry '{}'", title);
        return None;
    }

    let Some(watched_date) = first(row, &selectors.day, &selectors.day_fallback)
        .and_then(|day| day.value().attr("href"))
        .and_then(parse_diary_date)
    else {
        tracing::debug!("No readable diary date for '{}', skipping", title);
        return None;
    };

    let year = first(row, &selectors.year, &selectors.year_fallback)
        .map(|el| element_text(&el))
        .unwrap_or_default();

    let poster = row
        .select(&selectors.image)
        .next()
        .and_then(|img| {
            img.value()
                .attr("src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| img.value().attr("data-src"))
        })
        .unwrap_or("");

    Some(FilmRecord::new(
        title,
        year,
        rating,
        watched_date,
        normalize_poster_url(poster, base),
        detail_url.to_string(),
    ))
}

fn first<'a>(row: &ElementRef<'a>, primary: &Selector, fallback: &Selector) -> Option<ElementRef<'a>> {
    row.select(primary)
        .next()
        .or_else(|| row.select(fallback).next())
}

/// Reads the date from a diary day link such as `/dave/films/diary/for/2024/12/15/`
///
/// The last three all-digit path segments are taken as year, month and day.
pub fn parse_diary_date(href: &str) -> Option<NaiveDate> {
    let numbers: Vec<&str> = href
        .split('/')
        .filter(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
        .collect();

    let [year, month, day] = numbers.get(numbers.len().checked_sub(3)?..)? else {
        return None;
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
