//! Multi-page list crawl
//!
//! Fetch, parse, follow the next-page link, until there is no next link or the
//! page cap is reached. The first page is required; a later page that fails
//! to fetch ends the crawl with what was collected so far.

#![allow(clippy::uninlined_format_args)]

use std::collections::HashSet;

use tracing::{info, warn};

use super::{CrawlError, PageFetcher};
use crate::domain::{CrawlResult, MovieRecord};
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::parsing::{ListPage, ListPageParser, ParseContext};

/// Crawl bounds taken from the scraper configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub max_pages: u32,
    pub site_origin: String,
    pub stop_on_repeated_page: bool,
}

impl CrawlSettings {
    pub fn from_scraper_config(config: &ScraperConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            site_origin: config.site_origin.clone(),
            stop_on_repeated_page: config.stop_on_repeated_page,
        }
    }
}

/// Drives a page fetcher and the list parser across a list's pages
pub struct ListCrawler<F> {
    fetcher: F,
    parser: ListPageParser,
    settings: CrawlSettings,
}

impl<F: PageFetcher> ListCrawler<F> {
    pub const fn new(fetcher: F, parser: ListPageParser, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            parser,
            settings,
        }
    }

    /// Build a crawler with the parser and bounds described by `config`
    pub fn from_config(fetcher: F, config: &ScraperConfig) -> Result<Self, CrawlError> {
        let parser = ListPageParser::from_config(config)?;
        Ok(Self::new(fetcher, parser, CrawlSettings::from_scraper_config(config)))
    }

    /// Crawl every reachable page of the list at `list_url`
    pub async fn crawl(&self, list_url: &str) -> Result<CrawlResult, CrawlError> {
        let mut current_url = Some(list_url.to_string());
        let mut visited: HashSet<String> = HashSet::new();
        let mut movies: Vec<MovieRecord> = Vec::new();
        let mut pages_visited: u32 = 0;

        while let Some(url) = current_url.take() {
            if pages_visited >= self.settings.max_pages {
                warn!(
                    "Page cap of {} reached, not fetching {}",
                    self.settings.max_pages, url
                );
                break;
            }

            let page_number = pages_visited + 1;
            info!("Fetching page {}: {}", page_number, url);

            let html = match self.fetcher.fetch_page(&url).await {
                Ok(html) => html,
                Err(e) if pages_visited == 0 => return Err(e),
                Err(e) => {
                    warn!(
                        "Stopping pagination at page {}, keeping {} movies: {}",
                        page_number,
                        movies.len(),
                        e
                    );
                    break;
                }
            };

            let page = self.parse_page(&html, page_number, &url)?;
            pages_visited = page_number;
            visited.insert(url);
            movies.extend(page.movies);

            current_url = page.next_page_url.filter(|next| {
                let repeated = self.settings.stop_on_repeated_page && visited.contains(next);
                if repeated {
                    warn!("Pagination loops back to {}, stopping", next);
                }
                !repeated
            });
        }

        if movies.is_empty() {
            return Err(CrawlError::NoMoviesFound { pages_visited });
        }

        info!(
            "Crawl finished: {} movies from {} page(s)",
            movies.len(),
            pages_visited
        );

        Ok(CrawlResult {
            movies,
            pages_visited,
        })
    }

    fn parse_page(&self, html: &str, page_number: u32, url: &str) -> Result<ListPage, CrawlError> {
        let context = ParseContext::new(page_number, url, self.settings.site_origin.as_str());
        let page = self.parser.parse_document(html, &context)?;
        info!(
            "Page {}: {} movies ({} items, {} skipped)",
            page_number,
            page.movies.len(),
            page.items_found,
            page.items_skipped
        );
        Ok(page)
    }
}
