// src/catalog/recent.rs
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::config::cache_dir;

pub const RECENT_LIMIT: usize = 10;
const RECENT_FILE: &str = "recent_searches.txt";

/// Most-recent-first list of past searches, capped at ten with duplicates
/// dropped. Persisted as one query per line so it survives restarts.
pub struct RecentQueries {
    path: PathBuf,
    entries: Vec<String>,
}

impl RecentQueries {
    pub fn load_default() -> Self {
        Self::load_from(cache_dir().join(RECENT_FILE))
    }

    /// Load from an explicit file. Absent or unreadable file means an empty
    /// list; duplicates and overflow in a hand-edited file are dropped.
    pub fn load_from(path: PathBuf) -> Self {
        let mut entries: Vec<String> = Vec::new();
        if let Ok(txt) = fs::read_to_string(&path) {
            for line in txt.lines() {
                let line = line.trim();
                if line.is_empty() || entries.iter().any(|e| e == line) {
                    continue;
                }
                entries.push(line.to_string());
                if entries.len() == RECENT_LIMIT {
                    break;
                }
            }
        }
        Self { path, entries }
    }

    /// Move `query` to the front, evicting the oldest entry at capacity,
    /// and persist the updated list.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|q| q != query);
        while self.entries.len() >= RECENT_LIMIT {
            self.entries.pop();
        }
        self.entries.insert(0, query.to_string());

        if let Err(err) = self.save() {
            warn!(
                "failed to persist recent searches {}: {err}",
                self.path.display()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.entries.join("\n"))
    }
}
