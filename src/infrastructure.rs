//! Infrastructure layer: configuration, logging, HTTP, parsing and crawling
//!
//! Everything that touches the network or the filesystem lives here; the
//! parsers are pure functions over already fetched markup.

pub mod config;  // Configuration loading and constants
pub mod logging;  // Logging infrastructure
pub mod http_client;  // Single-GET page fetcher
pub mod parsing;  // List and film page parsers
pub mod crawling;  // Multi-page crawl and film detail lookup

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, LoggingConfig, ScraperConfig, ServerConfig};
pub use http_client::{HttpClient, HttpClientConfig};
pub use parsing::{FieldNormalizer, FilmDetailParser, ListPage, ListPageParser, ParsingConfig, ParsingError};
pub use crawling::{CrawlError, FilmDetailFetcher, ListCrawler, PageFetcher};
pub use logging::{init_logging, init_logging_with_config, get_log_directory};
