use serde::{Deserialize, Serialize};
use std::fmt;

/// One movie extracted from a list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Numeric film id when the markup carries one, otherwise the link slug
    pub id: String,
    /// Title with any trailing " (YYYY)" removed
    pub title: String,
    /// Four digit release year, or empty when it could not be discovered
    pub year: String,
    /// Absolute URL of the film's detail page
    pub link: String,
    /// Absolute poster URL; `None` when absent or a placeholder
    pub image: Option<String>,
}

impl MovieRecord {
    pub fn has_year(&self) -> bool {
        !self.year.is_empty()
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_year() {
            write!(f, "{} ({}) <{}>", self.title, self.year, self.link)
        } else {
            write!(f, "{} <{}>", self.title, self.link)
        }
    }
}

/// Outcome of crawling every reachable page of one list
///
/// Records keep page order, then document order within a page. Records
/// repeated across pages are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    pub movies: Vec<MovieRecord>,
    /// Number of pages that were fetched and parsed
    pub pages_visited: u32,
}

impl CrawlResult {
    pub fn total(&self) -> usize {
        self.movies.len()
    }
}

/// High resolution poster reference found on a film detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighResPoster {
    pub url: Option<String>,
}

impl HighResPoster {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }

    pub fn none() -> Self {
        Self { url: None }
    }

    pub fn into_url(self) -> Option<String> {
        self.url
    }
}
