//! Link extraction from listing pages
//!
//! A listing page yields two independent sets of links:
//!
//! - child path segments: for every anchor whose href starts with a given
//!   prefix and is strictly longer, the remainder after the prefix, in
//!   document order, duplicates preserved
//! - discovered airports: every anchor anywhere on the page whose href starts
//!   with the fixed `/airport/` path contributes the trailing code
//!
//! Callers dedupe airport codes against the frontier's seen set; child
//! segments are not deduplicated here or there.

use crate::address::AIRPORT_PATH;
use scraper::{Html, Selector};

/// Links extracted from one fetched document
#[derive(Debug, Clone, Default)]
pub struct ExtractedLinks {
    /// Remainders of hrefs matching the requested prefix, in document order
    pub children: Vec<String>,

    /// Airport codes discovered anywhere on the page, in document order
    pub airports: Vec<String>,
}

/// Extracts child segments and airport references from an HTML document
///
/// With `href_base = None` (leaf "scrape page" calls) only airport discovery
/// runs and `children` stays empty. Anchors without an `href` attribute are
/// skipped; malformed markup never aborts extraction.
pub fn extract_links(html: &str, href_base: Option<&str>) -> ExtractedLinks {
    let document = Html::parse_document(html);
    let mut extracted = ExtractedLinks::default();

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return extracted,
    };

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        if let Some(base) = href_base {
            if href.starts_with(base) && href.len() > base.len() {
                extracted.children.push(href[base.len()..].to_string());
            }
        }

        if href.starts_with(AIRPORT_PATH) && href.len() > AIRPORT_PATH.len() {
            extracted
                .airports
                .push(href[AIRPORT_PATH.len()..].to_string());
        }
    }

    extracted
}
