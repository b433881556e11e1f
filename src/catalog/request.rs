// src/catalog/request.rs
use serde::Deserialize;
use tracing::error;

use crate::catalog::movie::MovieRecord;
use crate::config::AppConfig;
use crate::net::Message;

/// Search endpoint under the API base. Pagination is 1-based.
pub const SEARCH_PATH: &str = "/search/movie";

/// Build the search message for one page of results.
pub fn search_message(cfg: &AppConfig, title: &str, page: u32) -> Message {
    Message::get(format!(
        "{}{}",
        cfg.api_base_url.trim_end_matches('/'),
        SEARCH_PATH
    ))
    .with_param("api_key", &cfg.api_key)
    .with_param("query", title)
    .with_param("page", &page.to_string())
}

/// Parsed body of one search response page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}

impl SearchPage {
    /// Permissive parse of an accepted response. A malformed body logs and
    /// yields an empty page; callers see no results rather than an error.
    pub fn from_message(message: &Message) -> Self {
        let Some(resp) = &message.response else {
            return Self::default();
        };
        match serde_json::from_slice(&resp.body) {
            Ok(page) => page,
            Err(err) => {
                error!("failed to parse search response for {}: {err}", message.path);
                Self::default()
            }
        }
    }
}
