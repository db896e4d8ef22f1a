//! List and film commands
//!
//! Thin request handlers over [`MoviePicker`]: validate, run, classify.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::validation::{validate_film_url, validate_list_url};
use super::CommandError;
use crate::application::MoviePicker;
use crate::domain::MovieRecord;
use crate::infrastructure::crawling::{CrawlError, PageFetcher};

pub const NO_MOVIES_FOUND: &str =
    "No movies found. The list might be private or the scraping logic needs update.";
pub const LIST_NOT_FOUND: &str = "List not found. Check the URL and make sure the list is public.";
pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const FILM_FETCH_FAILED: &str = "Failed to fetch film details";

/// Successful list crawl payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub movies: Vec<MovieRecord>,
    pub total: usize,
}

/// Successful film lookup payload; `poster` is null when the page has none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterResponse {
    pub poster: Option<String>,
}

/// Crawl every page of a list
pub async fn load_list<F: PageFetcher>(
    picker: &MoviePicker<F>,
    url: Option<&str>,
) -> Result<ListResponse, CommandError> {
    let url = validate_list_url(url)?;
    info!("Loading list: {}", url);

    let result = picker.load_list(url).await.map_err(|e| list_error(url, e))?;
    let total = result.total();

    Ok(ListResponse {
        movies: result.movies,
        total,
    })
}

/// Look up the high resolution poster of a film
pub async fn film_poster<F: PageFetcher>(
    picker: &MoviePicker<F>,
    url: Option<&str>,
) -> Result<PosterResponse, CommandError> {
    let url = validate_film_url(url)?;

    let poster = picker.film_poster(url).await.map_err(|e| {
        error!("Error fetching film details for {}: {}", url, e);
        CommandError::internal(FILM_FETCH_FAILED)
    })?;

    Ok(PosterResponse {
        poster: poster.into_url(),
    })
}

fn list_error(url: &str, error: CrawlError) -> CommandError {
    match error {
        CrawlError::NoMoviesFound { pages_visited } => {
            warn!("No movies found in {} after {} page(s)", url, pages_visited);
            CommandError::not_found(NO_MOVIES_FOUND)
        }
        e if e.is_upstream_not_found() => {
            warn!("List page does not exist: {}", e);
            CommandError::not_found(LIST_NOT_FOUND)
        }
        e => {
            error!("Scraping error for {}: {}", url, e);
            CommandError::internal(INTERNAL_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ScraperConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serves one fixed response and counts requests
    struct Canned {
        response: Result<String, CrawlError>,
        requests: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for Canned {
        async fn fetch_page(&self, _url: &str) -> Result<String, CrawlError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn picker(response: Result<String, CrawlError>) -> (MoviePicker<Arc<Canned>>, Arc<Canned>) {
        let canned = Arc::new(Canned {
            response,
            requests: AtomicUsize::new(0),
        });
        let picker = MoviePicker::with_fetcher(Arc::clone(&canned), &ScraperConfig::default()).unwrap();
        (picker, canned)
    }

    const LIST_URL: &str = "https://letterboxd.com/user/list/favorites/";
    const FILM_URL: &str = "https://letterboxd.com/film/dune-2021/";

    #[tokio::test]
    async fn list_returns_movies_and_total() {
        let html = r#"<ul class="poster-list">
            <li class="posteritem"><div class="react-component" data-item-name="Dune (2021)" data-target-link="/film/dune-2021/"></div></li>
            <li class="posteritem"><div class="react-component" data-item-name="Ad"></div></li>
            <li class="posteritem" data-film-name="Alien (1979)" data-film-slug="/film/alien/"></li>
        </ul>"#;
        let (picker, _) = picker(Ok(html.to_string()));

        let response = load_list(&picker, Some(LIST_URL)).await.unwrap();
        assert_eq!(response.total, 2);
        assert_eq!(response.movies[0].title, "Dune");
        assert_eq!(response.movies[1].title, "Alien");
    }

    #[tokio::test]
    async fn invalid_input_never_fetches() {
        let (picker, canned) = picker(Ok(String::new()));

        let missing = load_list(&picker, None).await.unwrap_err();
        let wrong = load_list(&picker, Some("https://letterboxd.com/user/films/")).await.unwrap_err();
        let film = film_poster(&picker, Some(LIST_URL)).await.unwrap_err();

        assert!(matches!(missing, CommandError::BadRequest(_)));
        assert!(matches!(wrong, CommandError::BadRequest(_)));
        assert!(matches!(film, CommandError::BadRequest(_)));
        assert_eq!(canned.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let (picker, _) = picker(Ok("<html><body></body></html>".to_string()));
        assert_eq!(
            load_list(&picker, Some(LIST_URL)).await,
            Err(CommandError::not_found(NO_MOVIES_FOUND))
        );
    }

    #[tokio::test]
    async fn first_page_404_is_not_found() {
        let (picker, _) = picker(Err(CrawlError::HttpStatus {
            status: 404,
            url: LIST_URL.to_string(),
        }));
        assert_eq!(
            load_list(&picker, Some(LIST_URL)).await,
            Err(CommandError::not_found(LIST_NOT_FOUND))
        );
    }

    #[tokio::test]
    async fn transport_failure_hides_details() {
        let (picker, _) = picker(Err(CrawlError::network(LIST_URL, "connection reset")));
        let err = load_list(&picker, Some(LIST_URL)).await.unwrap_err();
        assert_eq!(err, CommandError::internal(INTERNAL_ERROR));
        assert!(!err.message().contains("connection reset"));
    }

    #[tokio::test]
    async fn film_without_preview_is_null_poster() {
        let (picker, _) = picker(Ok("<html><head></head></html>".to_string()));
        assert_eq!(
            film_poster(&picker, Some(FILM_URL)).await,
            Ok(PosterResponse { poster: None })
        );
    }

    #[tokio::test]
    async fn film_fetch_failure_is_internal() {
        let (picker, _) = picker(Err(CrawlError::Timeout {
            url: FILM_URL.to_string(),
            seconds: 15,
        }));
        assert_eq!(
            film_poster(&picker, Some(FILM_URL)).await,
            Err(CommandError::internal(FILM_FETCH_FAILED))
        );
    }
}
