//! Month filtering and top-N selection

use crate::film::FilmRecord;
use crate::month::YearMonth;

/// Maximum number of films returned for a month
pub const TOP_FILMS: usize = 4;

/// Keeps the rated films watched in `month` and returns the best [`TOP_FILMS`]
///
/// Films are ordered by rating, highest first. The sort is stable, so films
/// with equal ratings keep their input order, which is listing order (page by
/// page, then document order within a page).
pub fn rank(records: Vec<FilmRecord>, month: YearMonth) -> Vec<FilmRecord> {
    let mut eligible: Vec<FilmRecord> = records
        .into_iter()
        .filter(|film| film.rating() > 0 && month.contains(film.watched_date()))
        .collect();

    eligible.sort_by(|a, b| b.rating().cmp(&a.rating()));
    eligible.truncate(TOP_FILMS);

    tracing::debug!("Ranked {} films for {}", eligible.len(), month);
    eligible
}
