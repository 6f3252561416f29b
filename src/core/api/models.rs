//! Wire types for the recommendation service.
//!
//! Everything here is decoded leniently: the service has shipped several
//! shapes of the same record (`description` vs `overview`, `rating` vs
//! `vote_average`, numeric ids vs string ids, ratings as text), and a bad
//! field must never take the whole page down with it.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope returned by every paginated fetch.
///
/// `next` / `previous` are complete locators issued by the server; they are
/// fetched verbatim and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default, deserialize_with = "cursor")]
    pub next: Option<String>,
    #[serde(default, deserialize_with = "cursor")]
    pub previous: Option<String>,
    #[serde(
        default = "Vec::new",
        deserialize_with = "lenient_items",
        bound(deserialize = "T: DeserializeOwned")
    )]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, next: Option<String>, previous: Option<String>) -> Self {
        Self {
            next,
            previous,
            results,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None, None)
    }
}

/// A genre or talent reference attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "id_text")]
    pub id: String,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One recommended movie, an immutable snapshot of the server response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, deserialize_with = "id_text")]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "tags")]
    pub genre: Vec<Tag>,
    #[serde(default, deserialize_with = "tags")]
    pub talent: Vec<Tag>,
    #[serde(default, deserialize_with = "opt_text")]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "opt_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub poster_path: Option<String>,
}

impl Movie {
    /// Free-text description, whichever field the server filled in.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.overview.as_deref())
    }

    /// Numeric rating from either `rating` or `vote_average`.
    pub fn score(&self) -> Option<f64> {
        self.rating.or(self.vote_average)
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    /// Upper-cased language code, e.g. `EN`.
    pub fn language(&self) -> Option<String> {
        self.original_language.as_deref().map(str::to_uppercase)
    }

    /// First `limit` genre names joined for a compact card label.
    pub fn genre_label(&self, limit: usize) -> Option<String> {
        if self.genre.is_empty() {
            return None;
        }
        Some(
            self.genre
                .iter()
                .take(limit)
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Absolute poster URL on the given image host.
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        let path = self.poster_path.as_deref()?;
        Some(format!(
            "{}/{}",
            image_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

// ── Lenient field decoders ──────────────────────────────────────────────────

fn cursor<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_items<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(raw)) = Option::<Value>::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value(v) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping undecodable result #{i}: {e}");
                None
            }
        })
        .collect())
}

fn id_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(opt_text(d)?.unwrap_or_default())
}

fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let n = match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|v| v.is_finite()))
}

fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Tag>, D::Error> {
    let Some(Value::Array(raw)) = Option::<Value>::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_movie_decodes() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 42,
            "title": "Heat",
            "description": "A heist thriller.",
            "release_date": "1995-12-15",
            "rating": "8.3",
            "genre": [{"id": 80, "name": "Crime"}, {"id": 53, "name": "Thriller"}],
            "talent": [{"id": 1, "name": "Al Pacino"}],
            "original_language": "en",
            "similarity_score": 0.41,
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": "2024-02-03T04:05:06.123456"
        }))
        .unwrap();

        assert_eq!(movie.id, "42");
        assert_eq!(movie.summary(), Some("A heist thriller."));
        assert_eq!(movie.score(), Some(8.3));
        assert_eq!(movie.year(), Some(1995));
        assert_eq!(movie.language().as_deref(), Some("EN"));
        assert_eq!(movie.genre_label(1).as_deref(), Some("Crime"));
        assert_eq!(movie.genre[0].id, "80");
        assert!(movie.created_at().is_some());
        assert!(movie.updated_at().is_some());
    }

    #[test]
    fn test_alternate_field_names() {
        let movie: Movie = serde_json::from_value(json!({
            "id": "tt0113277",
            "title": "Heat",
            "overview": "Overview text",
            "vote_average": 7.9,
            "poster_path": "/abc.jpg"
        }))
        .unwrap();

        assert_eq!(movie.summary(), Some("Overview text"));
        assert_eq!(movie.score(), Some(7.9));
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w200/").as_deref(),
            Some("https://image.tmdb.org/t/p/w200/abc.jpg")
        );
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let movie: Movie = serde_json::from_value(json!({
            "title": "Odd",
            "genre": "Drama",
            "talent": [{"id": 1}, {"id": 2, "name": "Kept"}],
            "rating": "n/a",
            "release_date": "someday",
            "similarity_score": null
        }))
        .unwrap();

        assert!(movie.genre.is_empty());
        assert_eq!(movie.talent, vec![Tag::new("2", "Kept")]);
        assert_eq!(movie.score(), None);
        assert_eq!(movie.year(), None);
        assert_eq!(movie.similarity_score, None);
        assert_eq!(movie.id, "");
    }

    #[test]
    fn test_page_skips_bad_items_and_blank_cursors() {
        let page: Page<Movie> = serde_json::from_value(json!({
            "next": "",
            "previous": null,
            "results": [{"title": "Good"}, 17, {"title": "Also good"}]
        }))
        .unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_page_missing_results() {
        let page: Page<Movie> =
            serde_json::from_value(json!({"next": "http://x/?cursor=2"})).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next.as_deref(), Some("http://x/?cursor=2"));
    }

    #[derive(Debug, Deserialize)]
    struct Bare {
        id: u32,
    }

    fn decode_page<T: DeserializeOwned>(body: &[u8]) -> Page<T> {
        serde_json::from_slice(body).unwrap()
    }

    #[test]
    fn test_page_decodes_generically_without_default_items() {
        let page: Page<Bare> = decode_page(br#"{"results": [{"id": 1}, "x", {"id": 3}]}"#);
        let ids: Vec<u32> = page.results.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let empty: Page<Bare> = decode_page(br#"{"next": null}"#);
        assert!(empty.results.is_empty());
    }

    #[test]
    fn test_non_finite_numbers_are_absent() {
        let movie: Movie = serde_json::from_value(json!({
            "title": "Edge",
            "similarity_score": "inf",
            "rating": "NaN"
        }))
        .unwrap();
        assert_eq!(movie.similarity_score, None);
        assert_eq!(movie.score(), None);
    }
}
