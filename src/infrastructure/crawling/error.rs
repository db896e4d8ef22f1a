//! Crawl error types

use thiserror::Error;

use crate::infrastructure::parsing::ParsingError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrawlError {
    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Request timed out after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },

    #[error("No movies found after {pages_visited} page(s)")]
    NoMoviesFound { pages_visited: u32 },

    #[error("Parsing failed: {0}")]
    Parsing(#[from] ParsingError),
}

impl CrawlError {
    pub fn network(url: &str, reason: impl ToString) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Failures of a single fetch; tolerated past the first list page
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Network { .. } | Self::Timeout { .. }
        )
    }

    /// Upstream answered 404
    pub const fn is_upstream_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }
}
