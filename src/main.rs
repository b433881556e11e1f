// src/main.rs
use std::env;

use tracing::error;
use tracing_subscriber::EnvFilter;

use cinesearch::catalog::{MovieDataHandler, MovieStore, RecentQueries};
use cinesearch::config::{load_config, local_db_path};
use cinesearch::net::HttpSender;
use cinesearch::warning::LogWarningSink;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cinesearch <title> [pages]");
        std::process::exit(1);
    }
    let title = &args[1];
    let pages: u32 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1)
        .max(1);

    let cfg = load_config();
    if cfg.api_key.is_empty() {
        eprintln!("No api_key configured; add one to config.json.");
        std::process::exit(1);
    }

    let sender = match HttpSender::new(&cfg) {
        Ok(sender) => sender,
        Err(err) => {
            error!("failed to build http client: {err}");
            std::process::exit(1);
        }
    };
    let store = match MovieStore::open(&local_db_path()) {
        Ok(store) => store,
        Err(err) => {
            error!("failed to open movie cache: {err}");
            std::process::exit(1);
        }
    };

    let mut handler = MovieDataHandler::new(
        cfg,
        Box::new(sender),
        store,
        Box::new(LogWarningSink),
        RecentQueries::load_default(),
    );

    handler.download_movies(title, |ok| {
        if !ok {
            eprintln!("Search failed; showing cached results if any.");
        }
    });

    for _ in 1..pages {
        if !handler.has_next_page() {
            break;
        }
        handler.download_next_page(|ok| {
            if !ok {
                eprintln!("Could not fetch the next page.");
            }
        });
    }

    print_results(&handler);
    print_recents(&handler);
}

fn print_results(handler: &MovieDataHandler) {
    let count = handler.result_count();
    if count == 0 {
        println!("No results.");
        return;
    }

    for index in 0..count {
        match handler.movie_at(index) {
            Some(movie) => {
                let date = if movie.formatted_release_date.is_empty() {
                    "release date unknown"
                } else {
                    movie.formatted_release_date.as_str()
                };
                println!("{:>3}. {} ({})", index + 1, movie.title, date);
                if !movie.overview.is_empty() {
                    println!("     {}", one_line(&movie.overview, 100));
                }
            }
            // the reserved slot: more pages are available
            None => println!("     … more results available (re-run with a higher page count)"),
        }
    }
}

fn print_recents(handler: &MovieDataHandler) {
    if handler.recent_query_count() == 0 {
        return;
    }
    println!();
    println!("Recent searches:");
    for index in 0..handler.recent_query_count() {
        if let Some(query) = handler.recent_query_at(index) {
            println!("  - {query}");
        }
    }
}

fn one_line(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let truncated: String = flat.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}
