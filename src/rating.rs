//! Star glyph rating codec
//!
//! Listing pages never carry a numeric rating. A rating is shown as a run of
//! full star glyphs optionally followed by a half star, so "★★★½" is three and a
//! half stars. Ratings are stored on a half-star scale from 0 to 10.

/// Full star glyph, worth two half-star units
pub const FULL_STAR: char = '★';

/// Half star glyph, worth one half-star unit
pub const HALF_STAR: char = '½';

/// Highest value on the half-star scale (five full stars)
pub const MAX_RATING: u8 = 10;

/// Converts a star glyph string to the half-star scale
///
/// Any character other than the two glyphs is ignored, so empty or glyph-free
/// input yields 0. The result saturates at [`MAX_RATING`].
///
/// # Examples
///
/// ```
/// use boxdly::rating::encode;
///
/// assert_eq!(encode("★★★½"), 7);
/// assert_eq!(encode("★★★★★"), 10);
/// assert_eq!(encode(""), 0);
/// ```
pub fn encode(glyphs: &str) -> u8 {
    let total: u32 = glyphs
        .chars()
        .map(|c| match c {
            FULL_STAR => 2,
            HALF_STAR => 1,
            _ => 0,
        })
        .sum();

    total.min(u32::from(MAX_RATING)) as u8
}

/// Returns the rating as a number of stars (e.g. 7 -> 3.5)
pub fn to_stars(rating: u8) -> f32 {
    f32::from(rating) / 2.0
}

/// Renders a half-star rating back to its glyph form
pub fn render(rating: u8) -> String {
    let rating = rating.min(MAX_RATING);
    let mut glyphs: String = std::iter::repeat(FULL_STAR)
        .take(usize::from(rating / 2))
        .collect();
    if rating % 2 == 1 {
        glyphs.push(HALF_STAR);
    }
    glyphs
}
