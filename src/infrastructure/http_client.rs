//! HTTP client for page fetching
//!
//! Issues a single GET per call with a browser identity header set. There is
//! no retry and no cookie store; every call is independent. Each fetch runs
//! under an explicit timeout that drops the in-flight request when it fires.
//!
//! The courtesy rate limiter belongs to the client, and one client serves the
//! whole process, so concurrent crawls share its budget.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use governor::{clock::DefaultClock, state::{direct::NotKeyed, InMemoryState}, Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::crawling::{CrawlError, PageFetcher};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Headers sent with every request (user agent, accept headers)
    pub headers: BTreeMap<String, String>,
    /// Timeout for one fetch, send and body read together
    pub timeout_seconds: u64,
    /// Courtesy rate limit; 0 disables it
    pub max_requests_per_second: u32,
}

impl HttpClientConfig {
    pub fn from_scraper_config(config: &ScraperConfig) -> Self {
        Self {
            headers: config.request_headers.clone(),
            timeout_seconds: config.request_timeout_seconds,
            max_requests_per_second: config.max_requests_per_second,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_scraper_config(&ScraperConfig::default())
    }
}

/// HTTP client with browser identity, timeout and optional rate limiting
pub struct HttpClient {
    client: Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        ensure!(config.timeout_seconds >= 1, "HTTP timeout must be at least one second");
        let headers = build_headers(&config.headers)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;

        let rate_limiter = NonZeroU32::new(config.max_requests_per_second)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    pub fn from_scraper_config(config: &ScraperConfig) -> Result<Self> {
        Self::new(HttpClientConfig::from_scraper_config(config))
    }

    /// Fetch a URL and return its body on a 2xx status
    ///
    /// The timeout covers the rate limiter wait as well as the request.
    pub async fn get_text(&self, url: &str) -> Result<String, CrawlError> {
        let seconds = self.config.timeout_seconds;

        match tokio::time::timeout(Duration::from_secs(seconds), self.throttled_get(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("🛑 HTTP request timed out after {}s: {}", seconds, url);
                Err(CrawlError::Timeout { url: url.to_string(), seconds })
            }
        }
    }

    async fn throttled_get(&self, url: &str) -> Result<String, CrawlError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        info!("🌐 HTTP GET: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ HTTP error {}: {}", status, url);
            return Err(CrawlError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await.map_err(|e| self.classify(url, &e))?;

        debug!("Successfully fetched: {} ({} chars)", url, text.len());
        Ok(text)
    }

    fn classify(&self, url: &str, error: &reqwest::Error) -> CrawlError {
        if error.is_timeout() {
            CrawlError::Timeout {
                url: url.to_string(),
                seconds: self.config.timeout_seconds,
            }
        } else {
            CrawlError::network(url, error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        self.get_text(url).await
    }
}

fn build_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid header name: {name}"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header {name}"))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn zero_rate_disables_limiter() {
        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        let client = HttpClient::new(config).unwrap();
        assert!(client.rate_limiter.is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = HttpClientConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[test]
    fn invalid_header_is_rejected() {
        let config = HttpClientConfig {
            headers: BTreeMap::from([("Bad Header".to_string(), "x".to_string())]),
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[test]
    fn default_headers_carry_browser_identity() {
        let headers = build_headers(&HttpClientConfig::default().headers).unwrap();
        let agent = headers.get(reqwest::header::USER_AGENT).unwrap().to_str().unwrap();
        assert!(agent.starts_with("Mozilla/5.0"));
        assert!(headers.contains_key(reqwest::header::ACCEPT_LANGUAGE));
    }
}
