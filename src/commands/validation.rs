//! Input validation
//!
//! Runs before any fetch; a rejected URL never reaches the network.

use url::Url;

use super::CommandError;
use crate::infrastructure::config::letterboxd;

pub const MISSING_URL: &str = "URL parameter is required";
pub const INVALID_LIST_URL: &str = "Invalid Letterboxd list URL. Must be a list page.";
pub const INVALID_FILM_URL: &str = "Invalid Film URL";

/// Accept an absolute http(s) URL of a list page
pub fn validate_list_url(url: Option<&str>) -> Result<&str, CommandError> {
    let url = require_url(url)?;
    if !is_http_url(url) || !url.contains(letterboxd::DOMAIN_MARKER) || !url.contains(letterboxd::LIST_PATH_MARKER) {
        return Err(CommandError::bad_request(INVALID_LIST_URL));
    }
    Ok(url)
}

/// Accept an absolute http(s) URL of a film page
pub fn validate_film_url(url: Option<&str>) -> Result<&str, CommandError> {
    let url = require_url(url)?;
    if !is_http_url(url) || !url.contains(letterboxd::FILM_PATH_MARKER) {
        return Err(CommandError::bad_request(INVALID_FILM_URL));
    }
    Ok(url)
}

fn require_url(url: Option<&str>) -> Result<&str, CommandError> {
    url.map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| CommandError::bad_request(MISSING_URL))
}

fn is_http_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://letterboxd.com/user/list/favorites/")]
    #[case("https://letterboxd.com/user/list/favorites/page/2/")]
    #[case("  https://letterboxd.com/user/list/favorites/  ")]
    fn accepts_list_urls(#[case] url: &str) {
        assert_eq!(validate_list_url(Some(url)).unwrap(), url.trim());
    }

    #[rstest]
    #[case(None, MISSING_URL)]
    #[case(Some(""), MISSING_URL)]
    #[case(Some("   "), MISSING_URL)]
    #[case(Some("https://letterboxd.com/user/films/"), INVALID_LIST_URL)]
    #[case(Some("https://example.com/user/list/favorites/"), INVALID_LIST_URL)]
    #[case(Some("letterboxd.com/user/list/favorites/"), INVALID_LIST_URL)]
    #[case(Some("ftp://letterboxd.com/user/list/favorites/"), INVALID_LIST_URL)]
    fn rejects_list_urls(#[case] url: Option<&str>, #[case] message: &str) {
        assert_eq!(validate_list_url(url), Err(CommandError::bad_request(message)));
    }

    #[rstest]
    #[case(Some("https://letterboxd.com/film/dune-2021/"), true)]
    #[case(Some("https://letterboxd.com/user/list/favorites/"), false)]
    #[case(Some("https://example.com/letterboxd.com/films/"), false)]
    #[case(None, false)]
    fn validates_film_urls(#[case] url: Option<&str>, #[case] ok: bool) {
        assert_eq!(validate_film_url(url).is_ok(), ok);
    }
}
