//! Display derivations for a result card: match percentage and rating badge.

/// Similarity at which a movie is shown as a 100% match. Raw scores from
/// the service rarely exceed it.
pub const MATCH_CEILING: f64 = 0.5;

/// Match percentage for a raw similarity score, in `[0, 100]`.
///
/// `round(clamp(score / MATCH_CEILING, 0, 1) × 100)`. Missing and NaN
/// scores are a 0% match; infinities clamp like any other value.
pub fn match_percent(score: Option<f64>) -> u8 {
    let Some(score) = score.filter(|s| !s.is_nan()) else {
        return 0;
    };
    let ratio = (score / MATCH_CEILING).clamp(0.0, 1.0);
    (ratio * 100.0).round() as u8
}

/// `★ 7.4` badge text; `None` when the movie is unrated.
pub fn rating_label(rating: Option<f64>) -> Option<String> {
    rating
        .filter(|r| r.is_finite() && *r > 0.0)
        .map(|r| format!("★ {r:.1}"))
}
