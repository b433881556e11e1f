// src/catalog/handler.rs
//
// Orchestrates one search session: downloads page 1 on a new search and
// further pages on demand, falls back to the local cache when the network
// fails, and keeps the recent-query list current. The view layer re-reads
// results through the index-based accessors after each completion.
use tracing::{info, warn};

use crate::catalog::movie::Movie;
use crate::catalog::recent::RecentQueries;
use crate::catalog::request::{search_message, SearchPage};
use crate::catalog::store::MovieStore;
use crate::config::AppConfig;
use crate::net::{Completed, NetworkSender};
use crate::warning::WarningSink;

pub struct MovieDataHandler {
    cfg: AppConfig,
    sender: Box<dyn NetworkSender>,
    store: MovieStore,
    warnings: Box<dyn WarningSink>,
    recents: RecentQueries,

    query: String,
    /// 1-based; 0 means no session yet.
    current_page: u32,
    total_pages: u32,
    downloading: bool,
    movies: Vec<Movie>,
}

impl MovieDataHandler {
    pub fn new(
        cfg: AppConfig,
        sender: Box<dyn NetworkSender>,
        store: MovieStore,
        warnings: Box<dyn WarningSink>,
        recents: RecentQueries,
    ) -> Self {
        Self {
            cfg,
            sender,
            store,
            warnings,
            recents,
            query: String::new(),
            current_page: 0,
            total_pages: 0,
            downloading: false,
            movies: Vec::new(),
        }
    }

    /// Start a fresh session for `title`: prior in-memory results and page
    /// counters are dropped before page 1 is fetched.
    pub fn download_movies(&mut self, title: &str, on_completion: impl FnOnce(bool)) {
        self.query = title.to_string();
        self.movies.clear();
        self.current_page = 0;
        self.total_pages = 0;
        self.fetch_page(1, on_completion);
    }

    /// Fetch the next page of the current session. Does nothing while a
    /// download is in flight or when no further page exists.
    pub fn download_next_page(&mut self, on_completion: impl FnOnce(bool)) {
        if self.downloading || !self.has_next_page() {
            return;
        }
        self.fetch_page(self.current_page + 1, on_completion);
    }

    fn fetch_page(&mut self, page: u32, on_completion: impl FnOnce(bool)) {
        self.current_page = page;
        self.downloading = true;
        info!("searching `{}` page {page}", self.query);

        let completed = {
            let sender = self.sender.as_ref();
            let mut message = search_message(&self.cfg, &self.query, page);
            message.response = Some(sender.execute(&message));
            message.finish(|| sender.is_reachable(), self.warnings.as_ref())
        };

        match completed {
            Completed::Success(message) => {
                self.on_page_downloaded(&SearchPage::from_message(&message));
                self.downloading = false;
                on_completion(true);
            }
            Completed::Failure(_) => {
                self.on_download_failed();
                self.downloading = false;
                on_completion(false);
            }
        }
    }

    fn on_page_downloaded(&mut self, page: &SearchPage) {
        self.total_pages = page.total_pages;

        let fetched: Vec<Movie> = page
            .results
            .iter()
            .map(|record| Movie::from_record(record, &self.query))
            .collect();

        self.persist_fetched(&fetched);
        if !fetched.is_empty() {
            self.recents.record(&self.query);
        }
        self.movies.extend(fetched);
    }

    /// Cache newly fetched rows. A page-1 fetch replaces the query's prior
    /// cache entry; later pages append without eviction. Persistence errors
    /// degrade the cache only, so they are logged and swallowed.
    fn persist_fetched(&mut self, fetched: &[Movie]) {
        if self.current_page == 1 {
            if let Err(err) = self.store.delete_for_query(&self.query) {
                warn!("{err}");
            }
        }
        if fetched.is_empty() {
            return;
        }
        if let Err(err) = self.store.insert(fetched) {
            warn!("{err}");
        }
    }

    /// With nothing on screen yet, fall back to the most recent cached
    /// results for this query; the cache is treated as a single complete
    /// page, so pagination ends there.
    fn on_download_failed(&mut self) {
        if !self.movies.is_empty() {
            return;
        }
        match self.store.load_for_query(&self.query) {
            Ok(cached) if !cached.is_empty() => {
                info!(
                    "loaded {} cached results for `{}` after failed fetch",
                    cached.len(),
                    self.query
                );
                self.movies = cached;
                self.current_page = 1;
                self.total_pages = 1;
            }
            Ok(_) => {}
            Err(err) => warn!("{err}"),
        }
    }

    // ---- accessors for the view layer ----

    /// Row count for a list view: the in-memory results plus one reserved
    /// slot for a loading-indicator row while more pages remain.
    pub fn result_count(&self) -> usize {
        let mut count = self.movies.len();
        if self.has_next_page() && count > 0 {
            count += 1;
        }
        count
    }

    pub fn has_next_page(&self) -> bool {
        self.total_pages > self.current_page
    }

    /// Bounds-checked lookup; the loading-indicator slot (and any stale
    /// index) comes back as None, not an error.
    pub fn movie_at(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn recent_query_count(&self) -> usize {
        self.recents.len()
    }

    pub fn recent_query_at(&self, index: usize) -> Option<&str> {
        self.recents.get(index)
    }
}
