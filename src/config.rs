//! Application Configuration
//!
//! One immutable value built at start-up and handed to the fetcher, server
//! and publisher. Nothing reads the environment after construction.

use std::time::Duration;
use thiserror::Error;

/// Keys that ship in sample config files and are never real credentials
const PLACEHOLDER_KEYS: [&str; 2] = ["YOUR_API_KEY_HERE", "여기에_발급받은_API키_입력"];

/// Stations published by default (Seoul districts)
pub const DEFAULT_STATIONS: [&str; 10] = [
    "종로구", "중구", "강남구", "마포구", "송파구",
    "강서구", "영등포구", "성북구", "용산구", "서초구",
];

/// Region reported for the default station list
pub const DEFAULT_REGION: &str = "서울";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Upstream service key; `None` when unset or a placeholder
    pub api_key: Option<String>,
    pub default_station: String,
    pub port: u16,
    /// Minimum gap between requests from one client (production only)
    pub min_poll_interval: Duration,
    pub cache_ttl: Duration,
    pub allowed_origins: String,
    pub production: bool,
    pub output_dir: String,
    pub stations: Vec<String>,
    /// Pause between upstream calls when publishing
    pub request_delay: Duration,
    /// Public URL of the published files, used in the README
    pub public_base_url: Option<String>,
    /// How often the publisher is scheduled, stated in the README
    pub update_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_station: "종로구".to_string(),
            port: 3000,
            min_poll_interval: Duration::from_secs(300),
            cache_ttl: Duration::from_secs(300),
            allowed_origins: "*".to_string(),
            production: false,
            output_dir: "./docs".to_string(),
            stations: DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
            request_delay: Duration::from_millis(1000),
            public_base_url: None,
            update_interval: Duration::from_secs(15 * 60),
        }
    }
}

impl AppConfig {
    /// Build from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    ///
    /// # Keys
    /// - `AIR_KOREA_API_KEY`, `DEFAULT_STATION`, `PORT`
    /// - `MIN_POLL_INTERVAL`, `CACHE_TTL` (seconds)
    /// - `ALLOWED_ORIGINS`, `APP_ENV` (`production` enables rate limiting)
    /// - `OUTPUT_DIR`, `STATIONS` (comma-separated), `REQUEST_DELAY_MS`
    /// - `PUBLIC_BASE_URL`, `UPDATE_INTERVAL_MINUTES`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get("AIR_KOREA_API_KEY").filter(|key| !PLACEHOLDER_KEYS.contains(&key.as_str()));

        if let Some(station) = get("DEFAULT_STATION") {
            config.default_station = station;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(secs) = get("MIN_POLL_INTERVAL") {
            config.min_poll_interval = Duration::from_secs(parse_number("MIN_POLL_INTERVAL", &secs)?);
        }
        if let Some(secs) = get("CACHE_TTL") {
            config.cache_ttl = Duration::from_secs(parse_number("CACHE_TTL", &secs)?);
        }
        if let Some(origins) = get("ALLOWED_ORIGINS") {
            config.allowed_origins = origins;
        }
        config.production = get("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production"));
        if let Some(dir) = get("OUTPUT_DIR") {
            config.output_dir = dir;
        }
        if let Some(list) = get("STATIONS") {
            let stations: Vec<String> = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !stations.is_empty() {
                config.stations = stations;
            }
        }
        if let Some(ms) = get("REQUEST_DELAY_MS") {
            config.request_delay = Duration::from_millis(parse_number("REQUEST_DELAY_MS", &ms)?);
        }
        config.public_base_url = get("PUBLIC_BASE_URL");
        if let Some(mins) = get("UPDATE_INTERVAL_MINUTES") {
            let mins: u64 = parse_number("UPDATE_INTERVAL_MINUTES", &mins)?;
            config.update_interval = Duration::from_secs(mins.saturating_mul(60));
        }

        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `"production"` or `"development"`
    pub fn environment(&self) -> &'static str {
        if self.production {
            "production"
        } else {
            "development"
        }
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
