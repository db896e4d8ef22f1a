//! Field normalization for list items
//!
//! Turns the raw attribute values of one list item into a [`MovieRecord`]:
//! splits "Title (Year)" names, validates years, makes the slug absolute and
//! drops placeholder poster art.

use regex::Regex;

use super::{resolve_site_url, ParsingError, ParsingResult};
use crate::domain::MovieRecord;

// `\d` would accept any Unicode digit; years are ASCII only.
const TITLE_YEAR_PATTERN: &str = r"^(.*)\s\(([0-9]{4})\)$";
const YEAR_PATTERN: &str = r"^[0-9]{4}$";

/// Candidate values extracted from one list item, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListItem {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub film_id: Option<String>,
    pub release_year: Option<String>,
    pub image: Option<String>,
}

impl RawListItem {
    /// Name and slug, when both carry a value
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|s| !s.trim().is_empty())?;
        let slug = self.slug.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((name, slug))
    }
}

/// Normalizes raw list item fields into movie records
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    title_year: Regex,
    year: Regex,
    site_origin: String,
    placeholder_marker: String,
}

impl FieldNormalizer {
    pub fn new(site_origin: &str, placeholder_marker: &str) -> ParsingResult<Self> {
        Ok(Self {
            title_year: compile_pattern(TITLE_YEAR_PATTERN)?,
            year: compile_pattern(YEAR_PATTERN)?,
            site_origin: site_origin.to_string(),
            placeholder_marker: placeholder_marker.to_string(),
        })
    }

    /// Build a record from a raw item
    ///
    /// Returns `Ok(None)` for items without a name or slug.
    pub fn normalize(&self, item: RawListItem) -> ParsingResult<Option<MovieRecord>> {
        let Some((name, slug)) = item.required_fields() else {
            return Ok(None);
        };

        let (title, year) = self.split_title_year(name, item.release_year.as_deref());
        let link = resolve_site_url(&self.site_origin, slug)?;
        let id = item
            .film_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(slug)
            .to_string();

        Ok(Some(MovieRecord {
            id,
            title,
            year,
            link,
            image: self.resolve_image(item.image.as_deref()),
        }))
    }

    /// Split "Title (YYYY)" into title and year
    ///
    /// A matching name yields the trimmed captured title, which may be empty.
    /// Names without a year suffix keep their full text as the title and take
    /// the fallback year when it is a valid four digit year.
    pub fn split_title_year(&self, name: &str, fallback_year: Option<&str>) -> (String, String) {
        if let Some(caps) = self.title_year.captures(name) {
            let title = caps.get(1).map_or("", |m| m.as_str()).trim();
            let year = caps.get(2).map_or("", |m| m.as_str());
            return (title.to_string(), year.to_string());
        }

        let year = fallback_year
            .map(str::trim)
            .filter(|y| self.year.is_match(y))
            .unwrap_or_default();

        (name.to_string(), year.to_string())
    }

    /// Poster URL to emit, or `None` for missing and placeholder images
    pub fn resolve_image(&self, src: Option<&str>) -> Option<String> {
        let src = src.filter(|s| !s.trim().is_empty())?;
        if !self.placeholder_marker.is_empty() && src.contains(&self.placeholder_marker) {
            return None;
        }
        Some(src.to_string())
    }
}

fn compile_pattern(pattern: &str) -> ParsingResult<Regex> {
    Regex::new(pattern).map_err(|e| ParsingError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
