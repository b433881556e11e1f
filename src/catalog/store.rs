// src/catalog/store.rs
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::catalog::movie::Movie;

/// Schema DDL run on open. Rows are partitioned by the search query that
/// produced them; `id` preserves fetch order for reloads.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    release_date TEXT NOT NULL DEFAULT '',
    formatted_release_date TEXT NOT NULL DEFAULT '',
    overview TEXT NOT NULL DEFAULT '',
    poster_path TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_movies_query ON movies(query);
";

/// Local cache of fetched search results, one row per movie.
pub struct MovieStore {
    conn: Connection,
}

impl MovieStore {
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create db dir {}: {e}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| format!("open movie cache db {}: {e}", path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, String> {
        let conn =
            Connection::open_in_memory().map_err(|e| format!("open in-memory db: {e}"))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, String> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| format!("init movie cache schema: {e}"))?;
        Ok(Self { conn })
    }

    /// Append rows in one transaction, preserving slice order.
    pub fn insert(&mut self, movies: &[Movie]) -> Result<(), String> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| format!("begin insert tx: {e}"))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO movies
                     (query, title, release_date, formatted_release_date, overview, poster_path)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(|e| format!("prepare insert: {e}"))?;
            for movie in movies {
                stmt.execute(params![
                    movie.query,
                    movie.title,
                    movie.release_date,
                    movie.formatted_release_date,
                    movie.overview,
                    movie.poster_path,
                ])
                .map_err(|e| format!("insert movie `{}`: {e}", movie.title))?;
            }
        }
        tx.commit().map_err(|e| format!("commit insert tx: {e}"))
    }

    /// Evict every cached row for a query. Returns the number removed.
    pub fn delete_for_query(&self, query: &str) -> Result<usize, String> {
        self.conn
            .execute("DELETE FROM movies WHERE query = ?1", [query])
            .map_err(|e| format!("delete cached rows for `{query}`: {e}"))
    }

    /// All cached rows for a query, in the order they were fetched.
    pub fn load_for_query(&self, query: &str) -> Result<Vec<Movie>, String> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT query, title, release_date, formatted_release_date, overview, poster_path
                 FROM movies WHERE query = ?1 ORDER BY id ASC",
            )
            .map_err(|e| format!("prepare cache query: {e}"))?;

        let rows = stmt
            .query_map([query], |row| {
                Ok(Movie {
                    query: row.get(0)?,
                    title: row.get(1)?,
                    release_date: row.get(2)?,
                    formatted_release_date: row.get(3)?,
                    overview: row.get(4)?,
                    poster_path: row.get(5)?,
                })
            })
            .map_err(|e| format!("query cached rows for `{query}`: {e}"))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("read cached row for `{query}`: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::MovieStore;
    use crate::catalog::movie::Movie;

    fn movie(query: &str, title: &str) -> Movie {
        Movie {
            query: query.to_string(),
            title: title.to_string(),
            release_date: "2008-04-08".to_string(),
            formatted_release_date: "08 April 2008".to_string(),
            overview: "overview".to_string(),
            poster_path: "/p.jpg".to_string(),
        }
    }

    #[test]
    fn round_trips_rows_per_query() {
        let mut store = MovieStore::open_in_memory().expect("open store");
        store
            .insert(&[movie("batman", "Batman Begins"), movie("batman", "Batman")])
            .expect("insert");
        store.insert(&[movie("alien", "Alien")]).expect("insert");

        let batman = store.load_for_query("batman").expect("load");
        assert_eq!(batman.len(), 2);
        assert_eq!(batman[0].title, "Batman Begins");
        assert_eq!(batman[1].title, "Batman");

        let alien = store.load_for_query("alien").expect("load");
        assert_eq!(alien.len(), 1);
        assert!(store.load_for_query("missing").expect("load").is_empty());
    }

    #[test]
    fn delete_scopes_to_one_query() {
        let mut store = MovieStore::open_in_memory().expect("open store");
        store
            .insert(&[movie("batman", "Batman"), movie("alien", "Alien")])
            .expect("insert");

        let removed = store.delete_for_query("batman").expect("delete");
        assert_eq!(removed, 1);
        assert!(store.load_for_query("batman").expect("load").is_empty());
        assert_eq!(store.load_for_query("alien").expect("load").len(), 1);
    }

    #[test]
    fn opens_on_disk_and_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("db").join("movie_cache.db");

        {
            let mut store = MovieStore::open(&path).expect("open store");
            store.insert(&[movie("batman", "Batman")]).expect("insert");
        }

        let store = MovieStore::open(&path).expect("reopen store");
        assert_eq!(store.load_for_query("batman").expect("load").len(), 1);
    }
}
