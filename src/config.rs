use std::path::PathBuf;
use crate::catalog::DEFAULT_MAX_PAGES;
use thiserror::Error;
use tracing::info;

const MUSIC_DIR: &str = "RELEASE_MATCHER_MUSIC_DIR";
const MUSIC_THRESHOLD: &str = "RELEASE_MATCHER_MUSIC_THRESHOLD";
const API_URL: &str = "RELEASE_MATCHER_API_URL";
const API_KEY: &str = "RELEASE_MATCHER_API_KEY";
const MAX_PAGES: &str = "RELEASE_MATCHER_MAX_PAGES";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration, loaded from a `.env` file and the environment
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Root of the directory tree to scan
    pub music_dir: PathBuf,
    /// Minimum audio size overlap (percent) for a partial match
    pub music_threshold: f64,
    /// Catalog base URL
    pub api_url: String,
    /// Catalog API key
    pub api_key: String,
    /// Most browse pages fetched per search
    pub max_pages: u32,
}

impl Config {
    /// Load `.env` if present, then read the environment
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            info!("Config: loaded .env file");
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let music_dir = PathBuf::from(required(MUSIC_DIR)?);

        let threshold = required(MUSIC_THRESHOLD)?;
        let music_threshold = threshold
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| (0.0..=100.0).contains(t))
            .ok_or(ConfigError::Invalid {
                name: MUSIC_THRESHOLD,
                value: threshold.clone(),
            })?;

        let max_pages = match lookup(MAX_PAGES).filter(|v| !v.trim().is_empty()) {
            None => DEFAULT_MAX_PAGES,
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|pages| *pages >= 1)
                .ok_or(ConfigError::Invalid {
                    name: MAX_PAGES,
                    value: value.clone(),
                })?,
        };

        let config = Self {
            music_dir,
            music_threshold,
            api_url: required(API_URL)?,
            api_key: required(API_KEY)?,
            max_pages,
        };

        info!(
            "Config: scanning {} with music threshold {}%",
            config.music_dir.display(),
            config.music_threshold
        );
        Ok(config)
    }
}
