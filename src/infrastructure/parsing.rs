//! HTML parsing infrastructure for list and film pages
//!
//! Trait-based parsers with configurable selectors and ordered attribute
//! fallbacks, because the site exposes the same data in more than one place.

pub mod error;
pub mod config;
pub mod context;
pub mod field_normalizer;
pub mod list_page_parser;
pub mod film_detail_parser;

// Re-export public types
pub use error::{ParsingError, ParsingResult};
pub use context::{DetailParseContext, ParseContext};
pub use config::{AttrScope, AttrSource, FilmDetailSelectors, ListPageSelectors, ParsingConfig};
pub use field_normalizer::{FieldNormalizer, RawListItem};
pub use list_page_parser::{ListPage, ListPageParser};
pub use film_detail_parser::FilmDetailParser;

use scraper::{Html, Selector};
use tracing::warn;

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile a single selector, keeping the offending string in the error
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        warn!("Failed to compile selector '{}': {}", selector, e);
        ParsingError::invalid_selector(selector, &e.to_string())
    })
}

/// Compile several selectors; every one of them must be valid
pub(crate) fn compile_selectors(selectors: &[String]) -> ParsingResult<Vec<Selector>> {
    if selectors.is_empty() {
        return Err(ParsingError::ConfigurationError {
            message: "at least one selector is required".to_string(),
        });
    }
    selectors.iter().map(|s| compile_selector(s)).collect()
}

/// Resolve a link found in markup against the site origin
///
/// Absolute URLs pass through; anything else is treated as a path on the
/// origin, the way the site writes its slugs (`/film/dune-2021/`).
pub fn resolve_site_url(origin: &str, href: &str) -> ParsingResult<String> {
    let href = href.trim();
    let resolved = if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), href)
    };

    url::Url::parse(&resolved).map_err(|e| ParsingError::UrlResolutionFailed {
        url: href.to_string(),
        reason: e.to_string(),
        base_url: Some(origin.to_string()),
    })?;

    Ok(resolved)
}
