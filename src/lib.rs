//! Movie Picker - Letterboxd list crawler
//!
//! Crawls every page of a public Letterboxd list into normalized movie
//! records, and looks up the high resolution poster of a single film.
//! Served over a small JSON HTTP API.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod commands;
pub mod server;

pub use application::MoviePicker;
pub use commands::{film_poster, load_list, CommandError, ListResponse, PosterResponse};
pub use domain::{CrawlResult, HighResPoster, MovieRecord};
pub use infrastructure::config::AppConfig;

/// Serve the API with the given configuration until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    server::run_server(&config).await
}
