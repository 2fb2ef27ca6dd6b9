//! Film record extracted from a listing page
//!
//! Records are built once by a listing parser and only read afterwards.

use crate::rating;
use chrono::NaiveDate;
use serde::Serialize;

/// One rated film from a user's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRecord {
    title: String,
    release_year: String,
    rating: u8,
    watched_date: NaiveDate,
    poster_url: String,
    detail_url: String,
}

impl FilmRecord {
    pub fn new(
        title: impl Into<String>,
        release_year: impl Into<String>,
        rating: u8,
        watched_date: NaiveDate,
        poster_url: impl Into<String>,
        detail_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            release_year: release_year.into(),
            rating,
            watched_date,
            poster_url: poster_url.into(),
            detail_url: detail_url.into(),
        }
    }

    /// Display title, empty if the markup did not carry one
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year as shown on the page (not validated)
    pub fn release_year(&self) -> &str {
        &self.release_year
    }

    /// Rating on the half-star scale (0..=10)
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Rating in stars (e.g. 3.5)
    pub fn star_rating(&self) -> f32 {
        rating::to_stars(self.rating)
    }

    /// Watched date; only its year and month are meaningful for grid entries
    pub fn watched_date(&self) -> NaiveDate {
        self.watched_date
    }

    pub fn poster_url(&self) -> &str {
        &self.poster_url
    }

    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }
}
