//! List crawling and film detail lookup
//!
//! `ListCrawler` walks a list's pagination strictly in sequence, since each
//! page's URL is only known after parsing the previous one. `FilmDetailFetcher`
//! is a single required fetch followed by one field of parsing.

pub mod error;
pub mod list_crawler;
pub mod film_detail_fetcher;

pub use error::CrawlError;
pub use list_crawler::{CrawlSettings, ListCrawler};
pub use film_detail_fetcher::FilmDetailFetcher;

use async_trait::async_trait;
use std::sync::Arc;

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET a page, returning its body on a 2xx status
    async fn fetch_page(&self, url: &str) -> Result<String, CrawlError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        (**self).fetch_page(url).await
    }
}
