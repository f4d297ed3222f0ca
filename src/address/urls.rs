//! Request URL templates for the five fetch kinds
//!
//! URLs mirror the directory's fixed layout:
//!
//! ```text
//! {base}/browse/Airports                                      continent listing
//! {base}/browse/Airports/continent/{c}                        country listing
//! {base}/browse/Airports/continent/{c}/country/{co}           state listing / non-US pages
//! {base}/browse/Airports/continent/{c}/country/{co}/state/{s} US pages
//! {base}/airport/{code}                                       airport detail
//! ```
//!
//! The `*_prefix` methods return the site-relative href prefix used to pick
//! out child links on a listing page; each is the child template with an
//! empty trailing segment.

/// Path prefix that identifies airport detail links anywhere on the site.
pub const AIRPORT_PATH: &str = "/airport/";

/// Encoded form of the one country that has a state level.
pub const US_COUNTRY: &str = "UNITED%20STATES";

const BROWSE_PATH: &str = "/browse/Airports";

/// Builds request URLs and href prefixes for a directory site.
///
/// Given identical encoded inputs, output URLs are byte-identical; the
/// builder holds only the configured base URL and does no I/O.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    /// Creates a builder for the given base URL (trailing `/` trimmed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the top-level continent listing.
    pub fn continents(&self) -> String {
        format!("{}{}", self.base, BROWSE_PATH)
    }

    /// URL of a continent's country listing.
    pub fn continent(&self, continent: &str) -> String {
        format!("{}{}/continent/{}", self.base, BROWSE_PATH, continent)
    }

    /// URL of a country's listing (states for the US, result pages otherwise).
    pub fn country(&self, continent: &str, country: &str) -> String {
        format!("{}/country/{}", self.continent(continent), country)
    }

    /// URL of a US state's result page listing.
    pub fn state(&self, continent: &str, country: &str, state: &str) -> String {
        format!("{}/state/{}", self.country(continent, country), state)
    }

    /// URL of one result page in the non-US branch.
    pub fn page(&self, continent: &str, country: &str, page: &str) -> String {
        format!("{}/p/{}", self.country(continent, country), page)
    }

    /// URL of one result page in the US branch.
    pub fn page_us(&self, continent: &str, country: &str, state: &str, page: &str) -> String {
        format!("{}/p/{}", self.state(continent, country, state), page)
    }

    /// URL of an airport detail page.
    pub fn airport(&self, code: &str) -> String {
        format!("{}{}{}", self.base, AIRPORT_PATH, code)
    }

    /// Href prefix matching continent links on the top-level listing.
    pub fn continent_prefix(&self) -> String {
        format!("{}/continent/", BROWSE_PATH)
    }

    /// Href prefix matching country links on a continent page.
    pub fn country_prefix(&self, continent: &str) -> String {
        format!("{}{}/country/", self.continent_prefix(), continent)
    }

    /// Href prefix matching state links on a US country page.
    pub fn state_prefix(&self, continent: &str, country: &str) -> String {
        format!("{}{}/state/", self.country_prefix(continent), country)
    }

    /// Href prefix matching page links on a non-US country page.
    pub fn page_prefix(&self, continent: &str, country: &str) -> String {
        format!("{}{}/p/", self.country_prefix(continent), country)
    }

    /// Href prefix matching page links on a US state page.
    pub fn page_prefix_us(&self, continent: &str, country: &str, state: &str) -> String {
        format!("{}{}/p/", self.state_prefix(continent, country), state)
    }
}
