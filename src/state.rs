use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tera::Tera;
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::LiveStats;
use crate::query::{HubQueryService, QuerySettings};
use crate::store::InMemoryHubTable;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_address: String,
    /// Seed file backing the hub table.
    pub data_path: PathBuf,
    /// Where to download the seed file from when it is missing.
    pub seed_url: Option<String>,
    /// Cron expression for reloading the seed file.
    pub refresh_cron: String,
    /// Cron expression for the live counter tick.
    pub live_stats_cron: String,
    /// Page size limits and store timeout for hub listing.
    pub query: QuerySettings,
}

impl Config {
    /// Creates Config from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = QuerySettings::default();
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8201".into()),
            data_path: env::var("HUBS_DATA_PATH")
                .unwrap_or_else(|_| "data/hubs.json".into())
                .into(),
            seed_url: env::var("HUBS_SEED_URL").ok().filter(|s| !s.is_empty()),
            refresh_cron: env::var("REFRESH_CRON").unwrap_or_else(|_| "0 0 * * * *".into()),
            live_stats_cron: env::var("LIVE_STATS_CRON")
                .unwrap_or_else(|_| "*/3 * * * * *".into()),
            query: QuerySettings {
                default_limit: env_or("DEFAULT_PAGE_SIZE", defaults.default_limit),
                max_limit: env_or("MAX_PAGE_SIZE", defaults.max_limit),
                store_timeout: Duration::from_millis(env_or(
                    "STORE_TIMEOUT_MS",
                    defaults.store_timeout.as_millis() as u64,
                )),
            },
        }
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(name: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
        default
    })
}

/// Shared application state passed to all request handlers.
pub struct AppState {
    /// Template engine for rendering HTML pages.
    pub tera: Tera,
    /// Hub listing over the injected store.
    pub hubs: HubQueryService,
    /// The in-process table behind `hubs`, kept for seed reloads.
    pub table: Arc<InMemoryHubTable>,
    /// Simulated headline counters.
    pub live: RwLock<LiveStats>,
}

impl AppState {
    pub fn new(
        tera: Tera,
        table: Arc<InMemoryHubTable>,
        settings: QuerySettings,
        live: LiveStats,
    ) -> Self {
        Self {
            tera,
            hubs: HubQueryService::new(table.clone(), settings),
            table,
            live: RwLock::new(live),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_accepts_numbers() {
        assert_eq!(parse_or("MAX_PAGE_SIZE", " 200 ", 500usize), 200);
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or("MAX_PAGE_SIZE", "many", 500usize), 500);
        assert_eq!(parse_or("STORE_TIMEOUT_MS", "-1", 5000u64), 5000);
    }
}
