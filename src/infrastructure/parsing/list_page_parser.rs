//! List page parser
//!
//! Extracts movie entries and the next-page link from one page of a list.
//! Every field is read through an ordered chain of attribute locations; an
//! item that yields neither a name nor a slug is skipped, not reported.

#![allow(clippy::uninlined_format_args)]

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::config::{AttrScope, AttrSource, ListPageSelectors};
use super::field_normalizer::{FieldNormalizer, RawListItem};
use super::{compile_selector, resolve_site_url, ContextualParser, ParseContext, ParsingResult};
use crate::domain::MovieRecord;
use crate::infrastructure::config::ScraperConfig;

/// Everything extracted from one list page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Records in document order
    pub movies: Vec<MovieRecord>,

    /// Absolute URL of the following page, if the page links one
    pub next_page_url: Option<String>,

    /// Number of list items matched before filtering
    pub items_found: usize,

    /// Items dropped for missing name/slug or an unusable link
    pub items_skipped: usize,
}

/// Parser for list pages
#[derive(Debug)]
pub struct ListPageParser {
    item_selector: Selector,
    nested_selector: Selector,
    image_selector: Selector,
    next_page_selector: Selector,
    selectors: ListPageSelectors,
    normalizer: FieldNormalizer,
}

impl ListPageParser {
    /// Create a parser from the scraper configuration
    pub fn from_config(config: &ScraperConfig) -> ParsingResult<Self> {
        let normalizer = FieldNormalizer::new(&config.site_origin, &config.placeholder_marker)?;
        Self::with_selectors(&config.parsing.list_page, normalizer)
    }

    /// Create parser with custom selector configuration
    pub fn with_selectors(selectors: &ListPageSelectors, normalizer: FieldNormalizer) -> ParsingResult<Self> {
        Ok(Self {
            item_selector: compile_selector(&selectors.item)?,
            nested_selector: compile_selector(&selectors.nested_component)?,
            image_selector: compile_selector(&selectors.image)?,
            next_page_selector: compile_selector(&selectors.next_page)?,
            selectors: selectors.clone(),
            normalizer,
        })
    }

    /// Parse raw markup; the parsed document never outlives this call
    pub fn parse_document(&self, html: &str, context: &ParseContext) -> ParsingResult<ListPage> {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, context)
    }

    /// Read every candidate field of one list item
    pub fn extract_item(&self, item: &ElementRef<'_>) -> RawListItem {
        let nested = item.select(&self.nested_selector).next();

        RawListItem {
            name: self.first_attr(item, nested.as_ref(), &self.selectors.name),
            slug: self.first_attr(item, nested.as_ref(), &self.selectors.slug),
            film_id: self.first_attr(item, nested.as_ref(), &self.selectors.film_id),
            release_year: self.first_attr(item, nested.as_ref(), &self.selectors.release_year),
            image: self.image_source(item, nested.as_ref()),
        }
    }

    /// Absolute URL of the next page, if the page links one
    pub fn next_page_url(&self, document: &Html, site_origin: &str) -> Option<String> {
        let href = document
            .select(&self.next_page_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .filter(|href| !href.trim().is_empty())?;

        match resolve_site_url(site_origin, href) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Ignoring unusable next-page link '{}': {}", href, e);
                None
            }
        }
    }

    /// First non-empty attribute along a fallback chain
    fn first_attr(
        &self,
        item: &ElementRef<'_>,
        nested: Option<&ElementRef<'_>>,
        chain: &[AttrSource],
    ) -> Option<String> {
        chain.iter().find_map(|source| {
            let node = match source.scope {
                AttrScope::Nested => nested?,
                AttrScope::Outer => item,
            };
            non_empty_attr(node, &source.attr)
        })
    }

    /// Poster source, searched under each configured scope in turn
    fn image_source(&self, item: &ElementRef<'_>, nested: Option<&ElementRef<'_>>) -> Option<String> {
        self.selectors.image_scopes.iter().find_map(|scope| {
            let root = match scope {
                AttrScope::Nested => nested?,
                AttrScope::Outer => item,
            };
            root.select(&self.image_selector)
                .next()
                .and_then(|img| non_empty_attr(&img, &self.selectors.image_attr))
        })
    }
}

fn non_empty_attr(node: &ElementRef<'_>, attr: &str) -> Option<String> {
    node.value()
        .attr(attr)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

impl ContextualParser for ListPageParser {
    type Output = ListPage;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let mut page = ListPage::default();

        for (index, item) in html.select(&self.item_selector).enumerate() {
            page.items_found += 1;
            let raw = self.extract_item(&item);

            match self.normalizer.normalize(raw) {
                Ok(Some(movie)) => page.movies.push(movie),
                Ok(None) => {
                    page.items_skipped += 1;
                    debug!(
                        "Skipping item {} on page {} ({}): no name or slug",
                        index, context.page_number, context.page_url
                    );
                }
                Err(e) => {
                    page.items_skipped += 1;
                    debug!(
                        "Skipping item {} on page {} ({}): {}",
                        index, context.page_number, context.page_url, e
                    );
                }
            }
        }

        page.next_page_url = self.next_page_url(html, &context.site_origin);

        debug!(
            "Found {} items on page {} <{}> ({} kept, {} skipped, next: {:?})",
            page.items_found,
            context.page_number,
            context.page_url,
            page.movies.len(),
            page.items_skipped,
            page.next_page_url
        );

        Ok(page)
    }
}
