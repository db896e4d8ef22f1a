//! Film detail parser
//!
//! Reads the canonical link-preview image of a film page. A page without
//! one is a normal result, not an error.

use scraper::{Html, Selector};
use tracing::debug;

use super::config::FilmDetailSelectors;
use super::context::DetailParseContext;
use super::{compile_selectors, ContextualParser, ParsingResult};
use crate::domain::HighResPoster;

/// Parser for film detail pages
#[derive(Debug)]
pub struct FilmDetailParser {
    poster_selectors: Vec<Selector>,
    poster_attr: String,
}

impl FilmDetailParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_selectors(&FilmDetailSelectors::default())
    }

    pub fn with_selectors(selectors: &FilmDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            poster_selectors: compile_selectors(&selectors.poster)?,
            poster_attr: selectors.poster_attr.clone(),
        })
    }

    /// Parse raw markup; the parsed document never outlives this call
    pub fn parse_document(&self, html: &str, context: &DetailParseContext) -> ParsingResult<HighResPoster> {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, context)
    }
}

impl ContextualParser for FilmDetailParser {
    type Output = HighResPoster;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let poster = self.poster_selectors.iter().find_map(|selector| {
            html.select(selector)
                .filter_map(|meta| meta.value().attr(&self.poster_attr))
                .map(str::trim)
                .find(|content| !content.is_empty())
                .map(str::to_string)
        });

        debug!("Poster for {}: {:?}", context.url, poster);
        Ok(HighResPoster::new(poster))
    }
}
