//! Film detail lookup
//!
//! One required fetch of a film page, then the preview image reference.

use tracing::info;

use super::{CrawlError, PageFetcher};
use crate::domain::HighResPoster;
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::parsing::{DetailParseContext, FilmDetailParser};

/// Fetches a film page and extracts its high resolution poster
pub struct FilmDetailFetcher<F> {
    fetcher: F,
    parser: FilmDetailParser,
}

impl<F: PageFetcher> FilmDetailFetcher<F> {
    pub const fn new(fetcher: F, parser: FilmDetailParser) -> Self {
        Self { fetcher, parser }
    }

    pub fn from_config(fetcher: F, config: &ScraperConfig) -> Result<Self, CrawlError> {
        let parser = FilmDetailParser::with_selectors(&config.parsing.film_detail)?;
        Ok(Self::new(fetcher, parser))
    }

    /// Fetch `film_url` and return its poster; a missing poster is not an error
    pub async fn fetch_poster(&self, film_url: &str) -> Result<HighResPoster, CrawlError> {
        let html = self.fetcher.fetch_page(film_url).await?;
        let poster = self
            .parser
            .parse_document(&html, &DetailParseContext::new(film_url))?;

        info!("Film poster for {}: {}", film_url, poster.url.as_deref().unwrap_or("none"));
        Ok(poster)
    }
}
