//! Domain module - Core movie entities
//!
//! Plain data types produced by the crawling pipeline. Nothing here performs
//! I/O; every value is built fresh per request and dropped after the response.

pub mod movie;

pub use movie::{CrawlResult, HighResPoster, MovieRecord};
