//! Shared fixtures for integration tests
#![allow(dead_code)]

use movie_picker::infrastructure::config::ScraperConfig;

/// List item rendered the way current list markup nests it
pub fn nested_item(name: &str, slug: &str, film_id: &str) -> String {
    format!(
        r#"<li class="posteritem">
            <div class="react-component" data-item-name="{name}" data-target-link="{slug}" data-film-id="{film_id}">
                <img src="https://a.ltrbxd.com/resized/{film_id}.jpg" />
            </div>
        </li>"#
    )
}

/// List item with no usable slug anywhere
pub fn malformed_item(name: &str) -> String {
    format!(r#"<li class="posteritem"><div class="react-component" data-item-name="{name}"></div></li>"#)
}

/// One list page, optionally linking the next one
pub fn list_page(items: &[String], next_href: Option<&str>) -> String {
    let next = next_href
        .map(|href| format!(r#"<a class="next" href="{href}">Older</a>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html><body>
        <ul class="poster-list">{}</ul>
        <div class="paginate-nextprev">{next}</div>
        </body></html>"#,
        items.join("\n")
    )
}

pub fn film_page(poster: Option<&str>) -> String {
    let meta = poster
        .map(|url| format!(r#"<meta property="og:image" content="{url}" />"#))
        .unwrap_or_default();
    format!(r#"<!DOCTYPE html><html><head><title>Film</title>{meta}</head><body></body></html>"#)
}

/// Scraper settings pointed at a local mock origin
pub fn scraper_config(origin: &str) -> ScraperConfig {
    ScraperConfig {
        site_origin: origin.to_string(),
        request_timeout_seconds: 2,
        max_requests_per_second: 0,
        ..ScraperConfig::default()
    }
}

/// Mock path that still carries the list markers the validator requires
pub const LIST_PATH: &str = "/letterboxd.com/user/list/favorites/";
pub const FILM_PATH: &str = "/letterboxd.com/film/dune-2021/";
