// src/catalog/movie.rs
//
// One search result as we persist it. Stores movie details from the server
// response, the query that produced them (the cache partition key), and a
// display-ready release date formatted up front (2008-04-08 -> 08 April 2008).
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movie {
    pub query: String,
    pub title: String,
    pub release_date: String,
    pub formatted_release_date: String,
    pub overview: String,
    pub poster_path: String,
}

/// Server-side shape of one search result. Fields the server omits (or
/// nulls, as `poster_path` often is) default to empty.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Movie {
    pub fn from_record(record: &MovieRecord, search_query: &str) -> Self {
        Self {
            query: search_query.to_string(),
            title: record.title.clone(),
            release_date: record.release_date.clone(),
            formatted_release_date: format_release_date(&record.release_date),
            overview: record.overview.clone(),
            poster_path: record.poster_path.clone().unwrap_or_default(),
        }
    }

    /// Full poster URL at the width appropriate for `height` pixels, or None
    /// when the server sent no poster path.
    pub fn poster_url(&self, image_base_url: &str, height: f32) -> Option<String> {
        if self.poster_path.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}{}",
            image_base_url.trim_end_matches('/'),
            poster_size_token(height),
            self.poster_path
        ))
    }
}

/// Reformat a `yyyy-MM-dd` server date for display. Empty input stays
/// empty; a malformed date logs and stays empty rather than failing the
/// whole record.
pub fn format_release_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%d %B %Y").to_string(),
        Err(err) => {
            warn!("unparseable release date `{raw}`: {err}");
            String::new()
        }
    }
}

/// Poster width variant for a target pixel height. Pure threshold mapping.
pub fn poster_size_token(height: f32) -> &'static str {
    if height < 70.0 {
        "w92"
    } else if height < 160.0 {
        "w185"
    } else {
        "w500"
    }
}

#[cfg(test)]
mod tests {
    use super::{format_release_date, poster_size_token, Movie, MovieRecord};

    #[test]
    fn formats_release_date() {
        assert_eq!(format_release_date("2008-04-08"), "08 April 2008");
        assert_eq!(format_release_date("1999-12-31"), "31 December 1999");
        assert_eq!(format_release_date(""), "");
    }

    #[test]
    fn malformed_release_date_degrades_to_empty() {
        assert_eq!(format_release_date("not-a-date"), "");
        assert_eq!(format_release_date("2008-13-40"), "");
        assert_eq!(format_release_date("08/04/2008"), "");
    }

    #[test]
    fn poster_size_boundaries_are_exact() {
        assert_eq!(poster_size_token(69.0), "w92");
        assert_eq!(poster_size_token(70.0), "w185");
        assert_eq!(poster_size_token(159.0), "w185");
        assert_eq!(poster_size_token(160.0), "w500");
    }

    #[test]
    fn record_mapping_defaults_missing_fields() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"title": "Batman Begins", "poster_path": null}"#)
                .expect("record should parse");
        let movie = Movie::from_record(&record, "batman");

        assert_eq!(movie.query, "batman");
        assert_eq!(movie.title, "Batman Begins");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.formatted_release_date, "");
        assert_eq!(movie.poster_path, "");
    }

    #[test]
    fn poster_url_combines_base_token_and_path() {
        let movie = Movie {
            poster_path: "/abc123.jpg".to_string(),
            ..Movie::default()
        };
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/", 150.0),
            Some("https://image.tmdb.org/t/p/w185/abc123.jpg".to_string())
        );

        let bare = Movie::default();
        assert_eq!(bare.poster_url("https://image.tmdb.org/t/p", 150.0), None);
    }
}
