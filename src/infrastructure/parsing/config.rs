//! Parsing configuration for HTML extraction
//!
//! Centralized CSS selectors and attribute fallback chains. Each chain is
//! tried in order and the first non-empty value wins.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// List page selectors
    pub list_page: ListPageSelectors,

    /// Film detail page selectors
    pub film_detail: FilmDetailSelectors,
}

/// Which node of a list item an attribute is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrScope {
    /// The rich component nested inside the item
    Nested,
    /// The list item itself
    Outer,
}

/// One step of an attribute fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrSource {
    pub scope: AttrScope,
    pub attr: String,
}

impl AttrSource {
    pub fn nested(attr: &str) -> Self {
        Self { scope: AttrScope::Nested, attr: attr.to_string() }
    }

    pub fn outer(attr: &str) -> Self {
        Self { scope: AttrScope::Outer, attr: attr.to_string() }
    }
}

/// Selectors for list pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPageSelectors {
    /// One match per movie entry
    pub item: String,

    /// Rich component carrying structured data attributes, searched inside an item
    pub nested_component: String,

    /// Poster image element
    pub image: String,

    /// Attribute holding the poster URL on the image element
    pub image_attr: String,

    /// Scopes searched for the poster image, in order
    pub image_scopes: Vec<AttrScope>,

    /// "Next page" navigation link
    pub next_page: String,

    /// "Title (Year)" name string
    pub name: Vec<AttrSource>,

    /// Relative link slug of the film page
    pub slug: Vec<AttrSource>,

    /// Numeric film identifier
    pub film_id: Vec<AttrSource>,

    /// Release year used when the name carries none
    pub release_year: Vec<AttrSource>,
}

impl Default for ListPageSelectors {
    fn default() -> Self {
        Self {
            item: ".poster-list li.posteritem".to_string(),
            nested_component: "div.react-component".to_string(),
            image: "img".to_string(),
            image_attr: "src".to_string(),
            image_scopes: vec![AttrScope::Nested, AttrScope::Outer],
            next_page: ".paginate-nextprev a.next".to_string(),
            name: vec![
                AttrSource::nested("data-item-name"),
                AttrSource::outer("data-film-name"),
            ],
            slug: vec![
                AttrSource::nested("data-target-link"),
                AttrSource::nested("data-film-slug"),
                AttrSource::outer("data-film-slug"),
            ],
            film_id: vec![
                AttrSource::nested("data-film-id"),
                AttrSource::outer("data-film-id"),
            ],
            release_year: vec![
                AttrSource::nested("data-film-release-year"),
                AttrSource::outer("data-film-release-year"),
            ],
        }
    }
}

/// Selectors for film detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmDetailSelectors {
    /// Preview image meta tags, tried in order
    pub poster: Vec<String>,

    /// Attribute holding the image URL
    pub poster_attr: String,
}

impl Default for FilmDetailSelectors {
    fn default() -> Self {
        Self {
            poster: vec![r#"meta[property="og:image"]"#.to_string()],
            poster_attr: "content".to_string(),
        }
    }
}
