//! Configuration infrastructure
//!
//! Contains configuration loading and management for the list crawler.
//!
//! Configuration is organized into three sections:
//! 1. Server settings (bind address)
//! 2. Scraper settings (page cap, site origin, request identity, selectors)
//! 3. Logging settings

#![allow(clippy::uninlined_format_args)]

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use anyhow::{ensure, Result, Context};
use tokio::fs;
use tracing::info;

use crate::infrastructure::parsing::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Crawling and extraction settings
    pub scraper: ScraperConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Address the HTTP boundary binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Everything the crawl pipeline needs, passed explicitly into the crawlers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Hard upper bound on list pages fetched in one crawl
    pub max_pages: u32,

    /// Origin prefixed to relative slugs and pagination links
    pub site_origin: String,

    /// Substring identifying the site's stock "no poster" image
    pub placeholder_marker: String,

    /// Browser identity headers sent with every request
    pub request_headers: BTreeMap<String, String>,

    /// Timeout for a single fetch (send + body), in seconds
    pub request_timeout_seconds: u64,

    /// Courtesy rate limit per client; 0 disables it
    pub max_requests_per_second: u32,

    /// End a crawl when pagination points back at an already visited page
    pub stop_on_repeated_page: bool,

    /// CSS selectors and attribute fallback chains
    pub parsing: ParsingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ScraperConfig {
    /// Reject settings that would make every crawl fail
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_pages >= 1, "scraper.max_pages must be at least 1");
        ensure!(
            self.request_timeout_seconds >= 1,
            "scraper.request_timeout_seconds must be at least 1"
        );
        ensure!(!self.site_origin.trim().is_empty(), "scraper.site_origin must not be empty");
        Ok(())
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_pages: defaults::MAX_PAGES,
            site_origin: letterboxd::ORIGIN.to_string(),
            placeholder_marker: letterboxd::PLACEHOLDER_MARKER.to_string(),
            request_headers: defaults::request_headers(),
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            stop_on_repeated_page: defaults::STOP_ON_REPEATED_PAGE,
            parsing: ParsingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("h2".to_string(), "warn".to_string());
                filters.insert("tower_http".to_string(), "info".to_string());
                filters.insert("movie_picker".to_string(), defaults::LOG_LEVEL.to_string());
                filters
            },
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Create a configuration manager pointing at the per-user config file
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        let config_path = config_dir.join(defaults::CONFIG_FILE_NAME);

        Ok(Self { config_path })
    }

    /// Create a configuration manager for an explicit file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { config_path: path.into() }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path).await
            .with_context(|| format!("Failed to read configuration file {:?}", self.config_path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration file {:?}", self.config_path))?;
        config.scraper.validate()
            .with_context(|| format!("Invalid configuration file {:?}", self.config_path))?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await
                    .with_context(|| format!("Failed to create config directory {:?}", parent))?;
                info!("📁 Created configuration directory: {:?}", parent);
            }
        }

        let content = serde_json::to_string_pretty(config)
            .context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content).await
            .with_context(|| format!("Failed to write configuration file {:?}", self.config_path))?;

        info!("Configuration saved to: {:?}", self.config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Letterboxd site constants
pub mod letterboxd {
    /// Origin prefixed to every relative link found in list markup
    pub const ORIGIN: &str = "https://letterboxd.com";

    /// Domain marker required in every accepted URL
    pub const DOMAIN_MARKER: &str = "letterboxd.com/";

    /// Path marker identifying list pages
    pub const LIST_PATH_MARKER: &str = "/list/";

    /// Domain + path marker identifying film detail pages
    pub const FILM_PATH_MARKER: &str = "letterboxd.com/film/";

    /// Substring of the stock poster served when no artwork exists
    pub const PLACEHOLDER_MARKER: &str = "empty-poster";
}

/// Default configuration values
pub mod defaults {
    use std::collections::BTreeMap;

    /// Directory name under the user config directory
    pub const APP_DIR_NAME: &str = "movie-picker";

    /// Configuration file name
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Default bind host
    pub const SERVER_HOST: &str = "127.0.0.1";

    /// Default bind port
    pub const SERVER_PORT: u16 = 3000;

    /// Default maximum list pages crawled per request
    pub const MAX_PAGES: u32 = 10;

    /// Default per-fetch timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 15;

    /// Default courtesy rate limit
    pub const MAX_REQUESTS_PER_SECOND: u32 = 5;

    /// Stop on cyclic pagination by default
    pub const STOP_ON_REPEATED_PAGE: bool = true;

    /// Browser identity; the site serves reduced markup to unknown clients
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Header set sent with every outbound request
    pub fn request_headers() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Accept".to_string(), ACCEPT.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
        ])
    }
}
