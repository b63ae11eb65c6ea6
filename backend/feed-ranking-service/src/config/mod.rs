use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::services::profile_builder::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub feed: FeedConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// History window size
    pub history_limit: usize,
    /// Deadline for each upstream fetch
    pub fetch_timeout: Duration,
    /// Category chip meaning "no filter"
    pub all_category: String,
    /// Seed file for the in-memory store
    pub fixture_path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            fetch_timeout: Duration::from_millis(2000),
            all_category: "Semua".to_string(),
            fixture_path: PathBuf::from("fixtures/catalog.json"),
        }
    }
}

/// Viewer the binary renders a feed for.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub user_id: Option<String>,
    pub category: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = FeedConfig::default();

        Ok(Config {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "feed-ranking-service".to_string()),
            },
            feed: FeedConfig {
                history_limit: parse_var("FEED_HISTORY_LIMIT", defaults.history_limit)?,
                fetch_timeout: Duration::from_millis(parse_var("FEED_FETCH_TIMEOUT_MS", 2000u64)?),
                all_category: env::var("FEED_ALL_CATEGORY").unwrap_or(defaults.all_category),
                fixture_path: env::var("FEED_FIXTURE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.fixture_path),
            },
            viewer: ViewerConfig {
                user_id: optional_var("FEED_USER_ID"),
                category: optional_var("FEED_CATEGORY"),
            },
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
