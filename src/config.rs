use std::sync::OnceLock;
use std::{fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const LOCAL_DB_DIR: &str = "db";
pub const LOCAL_CACHE_DB_FILE: &str = "movie_cache.db";

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub image_base_url: String,
    pub cache_dir: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            cache_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_key: Option<String>,
    #[serde(alias = "base_url")]
    api_base_url: Option<String>,
    image_base_url: Option<String>,
    cache_dir: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_config() -> AppConfig {
    let cfg_path = PathBuf::from("config.json");
    let mut cfg = AppConfig::default();

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(key) = parsed.api_key {
                    cfg.api_key = key;
                }
                if let Some(base) = parsed.api_base_url {
                    cfg.api_base_url = base;
                    if raw.contains("\"base_url\"") {
                        warn!(
                            "`base_url` is deprecated; rename it to `api_base_url` in config.json."
                        );
                    }
                }
                if let Some(base) = parsed.image_base_url {
                    cfg.image_base_url = base;
                }
                if parsed.cache_dir.is_some() {
                    cfg.cache_dir = parsed.cache_dir;
                }
                if let Some(secs) = parsed.request_timeout_secs {
                    cfg.request_timeout_secs = secs.clamp(1, 120);
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse config.json ({}). Using defaults.", err);
            }
        },
        Err(_) => {
            info!("No config.json found; using defaults");
        }
    }

    cfg
}

pub fn local_db_path() -> PathBuf {
    PathBuf::from(LOCAL_DB_DIR).join(LOCAL_CACHE_DB_FILE)
}

// Chosen once on first call
static CACHE_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();

pub fn cache_dir() -> PathBuf {
    CACHE_DIR_ONCE
        .get_or_init(|| {
            let cfg = load_config();
            let mut path = PathBuf::from(
                cfg.cache_dir
                    .unwrap_or_else(|| ".cinesearch_cache".to_string()),
            );

            if let Err(e) = fs::create_dir_all(&path) {
                warn!("failed to create cache dir {}: {e}", path.display());
                // Fall back to local folder if creation failed
                path = PathBuf::from(".cinesearch_cache");
                let _ = fs::create_dir_all(&path);
            }
            path
        })
        .clone()
}
