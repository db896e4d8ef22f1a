//! Parsing context for HTML extraction

/// Context information for list page parsing
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// 1-based position of the page within the crawl
    pub page_number: u32,

    /// URL the markup was fetched from
    pub page_url: String,

    /// Origin used to make slugs and pagination links absolute
    pub site_origin: String,
}

impl ParseContext {
    pub fn new(page_number: u32, page_url: impl Into<String>, site_origin: impl Into<String>) -> Self {
        Self {
            page_number,
            page_url: page_url.into(),
            site_origin: site_origin.into(),
        }
    }
}

/// Context for a film detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Film URL being parsed
    pub url: String,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
