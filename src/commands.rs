//! Request-style operations exposed to the presentation layer
//!
//! Each command validates its input before any network call and classifies
//! every failure as bad input, not found, or internal error. Internal
//! details are logged here and never returned to the caller.

pub mod error;
pub mod validation;
pub mod movie_commands;

pub use error::{CommandError, ErrorBody};
pub use movie_commands::{film_poster, load_list, ListResponse, PosterResponse};
pub use validation::{validate_film_url, validate_list_url};
