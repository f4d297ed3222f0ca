//! Address building for the airport directory
//!
//! This module turns raw taxonomy names (continents, countries, states) into
//! the URL-encoded path segments the directory expects, and builds the request
//! URLs and href prefixes for every level of the hierarchy.

mod encode;
mod urls;

pub use encode::{encode_continent, encode_country, encode_state};
pub use urls::{SiteUrls, AIRPORT_PATH, US_COUNTRY};
