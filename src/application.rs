//! Application layer
//!
//! `MoviePicker` wires one page fetcher into the list crawler and the film
//! detail fetcher. It holds no mutable state, so one instance is shared by
//! every request.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::{CrawlResult, HighResPoster};
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::crawling::{CrawlError, FilmDetailFetcher, ListCrawler, PageFetcher};
use crate::infrastructure::http_client::HttpClient;

/// Entry point for the two read-only operations
pub struct MoviePicker<F = Arc<HttpClient>> {
    list_crawler: ListCrawler<F>,
    film_fetcher: FilmDetailFetcher<F>,
}

impl MoviePicker {
    /// Build the production pipeline over a real HTTP client
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let client = Arc::new(
            HttpClient::from_scraper_config(config).context("Failed to build HTTP client")?,
        );
        Self::with_fetcher(client, config).context("Failed to build parsers")
    }
}

impl<F: PageFetcher + Clone> MoviePicker<F> {
    pub fn with_fetcher(fetcher: F, config: &ScraperConfig) -> Result<Self, CrawlError> {
        Ok(Self {
            list_crawler: ListCrawler::from_config(fetcher.clone(), config)?,
            film_fetcher: FilmDetailFetcher::from_config(fetcher, config)?,
        })
    }
}

impl<F: PageFetcher> MoviePicker<F> {
    /// Crawl every reachable page of a list
    pub async fn load_list(&self, list_url: &str) -> Result<CrawlResult, CrawlError> {
        self.list_crawler.crawl(list_url).await
    }

    /// Look up the high resolution poster of one film
    pub async fn film_poster(&self, film_url: &str) -> Result<HighResPoster, CrawlError> {
        self.film_fetcher.fetch_poster(film_url).await
    }
}
