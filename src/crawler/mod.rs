//! Crawler module
//!
//! This module contains the core crawling logic:
//! - HTTP fetching (no retries, sequential)
//! - Link extraction from listing pages
//! - Airport detail page extraction
//! - The frontier queues and the crawl coordinator

mod coordinator;
mod detail;
mod fetcher;
mod frontier;
mod links;

pub use coordinator::{CrawlStats, Crawler};
pub use detail::{parse_airport, ParseError};
pub use fetcher::{build_http_client, fetch_html, FetchError};
pub use frontier::{Frontier, FrontierError, Level};
pub use links::{extract_links, ExtractedLinks};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl to exhaustion
///
/// This is the main entry point: it opens the store, seeds the frontier from
/// the configured scope (or the full continent listing), and drives the
/// traversal until every queue is empty.
pub async fn crawl(config: Config) -> Result<CrawlStats> {
    let mut crawler = Crawler::new(config)?;
    crawler.run().await
}
