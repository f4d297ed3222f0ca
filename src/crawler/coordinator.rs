//! Crawl coordination
//!
//! The coordinator drives the five-level traversal: it refills each frontier
//! queue on demand from its parent listing page and drains it in FIFO order.
//! Page and airport queues are drained entirely within one parent context
//! before that context advances. All fetching is sequential; a fixed pause
//! follows every listing fetch and every stored record.

use crate::address::{encode_continent, encode_country, encode_state, SiteUrls, US_COUNTRY};
use crate::config::Config;
use crate::crawler::detail::parse_airport;
use crate::crawler::fetcher::{build_http_client, fetch_html};
use crate::crawler::frontier::{Frontier, Level};
use crate::crawler::links::extract_links;
use crate::storage::{AirportStore, InsertOutcome};
use crate::{AerodexError, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// Counters reported when a crawl finishes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    /// Listing pages fetched (all levels)
    pub listings_fetched: usize,
    /// Airport detail pages fetched
    pub airports_scraped: usize,
    /// Records written to the store
    pub airports_filed: usize,
    /// Records dropped because the FAA code was already present
    pub conflicts: usize,
    /// Detail pages abandoned on extraction failure
    pub parse_failures: usize,
}

/// Drives one crawl to exhaustion
pub struct Crawler {
    config: Config,
    urls: SiteUrls,
    client: Client,
    frontier: Frontier,
    store: AirportStore,
    stats: CrawlStats,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    ///
    /// Opens (or creates) the store, builds the HTTP client, and pre-seeds
    /// the frontier from the configured scope. With no scope the crawl
    /// starts from the full continent listing.
    pub fn new(config: Config) -> Result<Self> {
        let store = AirportStore::open(Path::new(&config.output.database_path))?;
        let client = build_http_client(&config.crawler)?;
        let urls = SiteUrls::new(&config.site.base_url);

        let mut frontier = Frontier::new();
        if let Some(continent) = &config.scope.continent {
            frontier.enqueue(Level::Continent, encode_continent(continent));

            if let Some(country) = &config.scope.country {
                frontier.enqueue(Level::Country, encode_country(country));

                if let Some(state) = &config.scope.state {
                    frontier.enqueue(Level::State, encode_state(state));
                }
            }
        }

        Ok(Self {
            config,
            urls,
            client,
            frontier,
            store,
            stats: CrawlStats::default(),
        })
    }

    /// Runs the crawl until every queue and parent context is exhausted
    pub async fn run(&mut self) -> Result<CrawlStats> {
        if self.frontier.is_empty(Level::Continent) {
            self.queue_continents().await;
        }

        while !self.frontier.is_empty(Level::Continent) {
            let continent = self.frontier.dequeue(Level::Continent)?;
            tracing::info!("crawling continent {}", continent);

            if self.frontier.is_empty(Level::Country) {
                self.queue_countries(&continent).await;
            }

            while !self.frontier.is_empty(Level::Country) {
                let country = self.frontier.dequeue(Level::Country)?;
                tracing::info!("crawling country {}", country);

                if country == US_COUNTRY {
                    if self.frontier.is_empty(Level::State) {
                        self.queue_states(&continent, &country).await;
                    }

                    while !self.frontier.is_empty(Level::State) {
                        let state = self.frontier.dequeue(Level::State)?;
                        tracing::info!("crawling state {}", state);

                        self.crawl_leaves(&continent, &country, Some(state.as_str()))
                            .await?;
                    }
                } else {
                    self.crawl_leaves(&continent, &country, None).await?;
                }
            }
        }

        tracing::info!(
            "crawl complete: {} listings fetched, {} airports scraped, \
             {} filed, {} conflicts, {} parse failures",
            self.stats.listings_fetched,
            self.stats.airports_scraped,
            self.stats.airports_filed,
            self.stats.conflicts,
            self.stats.parse_failures
        );

        Ok(self.stats)
    }

    /// Drains the page queue, then the airport queue, for one parent context
    async fn crawl_leaves(
        &mut self,
        continent: &str,
        country: &str,
        state: Option<&str>,
    ) -> std::result::Result<(), AerodexError> {
        if self.frontier.is_empty(Level::Page) {
            self.queue_pages(continent, country, state).await;
        }

        while !self.frontier.is_empty(Level::Page) {
            let page = self.frontier.dequeue(Level::Page)?;
            self.scrape_page(continent, country, state, &page).await;
        }

        while !self.frontier.is_empty(Level::Airport) {
            let code = self.frontier.dequeue(Level::Airport)?;
            self.scrape_airport(&code, state.is_some()).await;
        }

        Ok(())
    }

    /// Fetches the top-level listing and queues every continent
    async fn queue_continents(&mut self) {
        let url = self.urls.continents();
        let prefix = self.urls.continent_prefix();
        for child in self.fetch_children(&url, Some(prefix.as_str())).await {
            self.frontier.enqueue(Level::Continent, child);
        }
        self.pause().await;
    }

    /// Fetches a continent page and queues its countries
    async fn queue_countries(&mut self, continent: &str) {
        let url = self.urls.continent(continent);
        let prefix = self.urls.country_prefix(continent);
        for child in self.fetch_children(&url, Some(prefix.as_str())).await {
            self.frontier.enqueue(Level::Country, child);
        }
        self.pause().await;
    }

    /// Fetches the US country page and queues its states
    async fn queue_states(&mut self, continent: &str, country: &str) {
        let url = self.urls.country(continent, country);
        let prefix = self.urls.state_prefix(continent, country);
        for child in self.fetch_children(&url, Some(prefix.as_str())).await {
            self.frontier.enqueue(Level::State, child);
        }
        self.pause().await;
    }

    /// Fetches the page-level parent listing and queues its result pages
    ///
    /// The parent listing is itself the first result page, so any airports
    /// linked on it are discovered here too.
    async fn queue_pages(&mut self, continent: &str, country: &str, state: Option<&str>) {
        let (url, prefix) = match state {
            Some(state) => (
                self.urls.state(continent, country, state),
                self.urls.page_prefix_us(continent, country, state),
            ),
            None => (
                self.urls.country(continent, country),
                self.urls.page_prefix(continent, country),
            ),
        };

        for child in self.fetch_children(&url, Some(prefix.as_str())).await {
            self.frontier.enqueue(Level::Page, child);
        }
        self.pause().await;
    }

    /// Fetches one result page purely to discover airport links
    async fn scrape_page(
        &mut self,
        continent: &str,
        country: &str,
        state: Option<&str>,
        page: &str,
    ) {
        let url = match state {
            Some(state) => self.urls.page_us(continent, country, state, page),
            None => self.urls.page(continent, country, page),
        };

        self.fetch_children(&url, None).await;
        self.pause().await;
    }

    /// Fetches one airport detail page, extracts the record, and files it
    async fn scrape_airport(&mut self, code: &str, is_us: bool) {
        let url = self.urls.airport(code);
        self.stats.airports_scraped += 1;

        let body = match fetch_html(&self.client, &url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("failed to fetch airport {}: {}", url, e);
                return;
            }
        };

        let record = match parse_airport(&body, is_us) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("failed to parse airport information from {}: {}", url, e);
                self.stats.parse_failures += 1;
                return;
            }
        };

        match self.store.insert(&record) {
            Ok(InsertOutcome::Inserted) => {
                tracing::info!(
                    "filed airport {:?} under {:?}, {:?}, {}",
                    record.faa,
                    record.city,
                    record.state,
                    record.country
                );
                self.stats.airports_filed += 1;
                self.pause().await;
            }
            Ok(InsertOutcome::Conflict { faa }) => {
                tracing::warn!("airport with FAA {:?} already recorded, dropping", faa);
                self.stats.conflicts += 1;
            }
            Err(e) => {
                tracing::error!("failed to store airport from {}: {}", url, e);
            }
        }
    }

    /// Fetches a listing page and returns its prefix children
    ///
    /// Airport links found anywhere on the page are queued as a side effect,
    /// deduplicated by the frontier's seen set. A transport failure degrades
    /// to an empty child list.
    async fn fetch_children(&mut self, url: &str, href_base: Option<&str>) -> Vec<String> {
        self.stats.listings_fetched += 1;

        let body = match fetch_html(&self.client, url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("failed to fetch {}: {}", url, e);
                return Vec::new();
            }
        };

        let extracted = extract_links(&body, href_base);
        for code in extracted.airports {
            self.frontier.enqueue(Level::Airport, code);
        }

        extracted.children
    }

    /// Rate-limiting pause between requests to the remote site
    async fn pause(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.crawler.delay_ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, ScopeConfig, SiteConfig};

    fn test_config(db_path: &str) -> Config {
        Config {
            crawler: CrawlerConfig {
                delay_ms: 0,
                request_timeout_secs: 5,
                user_agent: "aerodex-test/0.1".to_string(),
            },
            site: SiteConfig {
                base_url: "http://directory.test".to_string(),
            },
            output: OutputConfig {
                database_path: db_path.to_string(),
            },
            scope: ScopeConfig::default(),
        }
    }

    #[test]
    fn test_scope_preseeds_frontier_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("airports.db");

        let mut config = test_config(db.to_str().unwrap());
        config.scope = ScopeConfig {
            continent: Some("North America".to_string()),
            country: Some("United States".to_string()),
            state: Some("New Mexico".to_string()),
        };

        let crawler = Crawler::new(config).unwrap();
        assert_eq!(crawler.frontier.len(Level::Continent), 1);
        assert_eq!(crawler.frontier.len(Level::Country), 1);
        assert_eq!(crawler.frontier.len(Level::State), 1);
    }

    #[test]
    fn test_no_scope_leaves_frontier_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("airports.db");

        let crawler = Crawler::new(test_config(db.to_str().unwrap())).unwrap();
        assert!(crawler.frontier.is_empty(Level::Continent));
    }
}
