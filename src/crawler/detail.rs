//! Airport detail page extraction
//!
//! Extraction runs in four ordered stages, each of which can fail on its own:
//! codes, name, location, then the key/value data table. A fatal failure
//! abandons the page; the crawl moves on without retrying.

use crate::storage::Airport;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use thiserror::Error;

/// Class prefix of the labeled code boxes (FAA/IATA/ICAO)
const CODE_BOX_PREFIX: &str = "code_box code_";

/// Class of the label cells in the data table
const DATA_LABEL_CLASS: &str = "dataLabel";

/// Fatal extraction failures for one detail page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("could not find airport codes")]
    MissingCodes,

    #[error("could not find airport name")]
    MissingName,

    #[error("could not find airport location")]
    MissingLocation,

    #[error("key/value table missing the {0} coordinate")]
    MissingCoordinate(&'static str),

    #[error("could not parse {field}: '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Parses one airport detail document into a record
///
/// `is_us` selects the US taxonomy branch, which changes how a comma-split
/// location line is disambiguated. Elevation is best-effort: a missing or
/// unparsable value defaults to 0 with a warning.
pub fn parse_airport(html: &str, is_us: bool) -> Result<Airport, ParseError> {
    let document = Html::parse_document(html);

    let codes = extract_codes(&document).ok_or(ParseError::MissingCodes)?;
    let faa = codes.get("FAA").cloned();
    let iata = codes.get("IATA").cloned();
    let icao = codes.get("ICAO").cloned();

    let name = extract_name(&document).ok_or(ParseError::MissingName)?;

    let (city, state, country) =
        extract_location(&document, is_us).ok_or(ParseError::MissingLocation)?;

    let values = extract_key_values(&document);

    let latitude = parse_coordinate(&values, "Latitude")?;
    let longitude = parse_coordinate(&values, "Longitude")?;

    let elevation = match values.get("Elevation") {
        Some(value) => {
            // the value carries a unit suffix, e.g. "958 ft"
            let first = value.split_whitespace().next().unwrap_or("");
            match first.parse::<i32>() {
                Ok(feet) => feet,
                Err(_) => {
                    tracing::warn!(
                        "could not parse elevation for {:?}: '{}'",
                        faa,
                        value
                    );
                    0
                }
            }
        }
        None => {
            tracing::warn!("airport {:?} did not contain elevation data", faa);
            0
        }
    };

    Ok(Airport {
        faa,
        iata,
        icao,
        name,
        city,
        state,
        country,
        latitude,
        longitude,
        elevation,
    })
}

/// Scans for labeled code boxes and returns code kind -> code
///
/// The FAA code is documented to appear last among the three, so scanning
/// stops as soon as it is seen.
fn extract_codes(document: &Html) -> Option<HashMap<String, String>> {
    let selector = Selector::parse("div[class]").ok()?;
    let mut codes = HashMap::new();

    for div in document.select(&selector) {
        let class = match div.value().attr("class") {
            Some(c) => c,
            None => continue,
        };

        let rest = match class.strip_prefix(CODE_BOX_PREFIX) {
            Some(r) => r,
            None => continue,
        };
        let end = match rest.rfind('_') {
            Some(e) => e,
            None => continue,
        };
        let key = rest[..end].to_string();
        let code = div.text().collect::<String>().trim().to_string();
        codes.entry(key.to_uppercase()).or_insert(code);

        if key == "faa" {
            break;
        }
    }

    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

/// First h1 with non-empty trimmed text
fn extract_name(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    document
        .select(&selector)
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

/// First h2, comma-split into (city, state, country)
fn extract_location(
    document: &Html,
    is_us: bool,
) -> Option<(Option<String>, Option<String>, String)> {
    let selector = Selector::parse("h2").ok()?;
    let h2 = document.select(&selector).next()?;
    let text = h2.text().collect::<String>().trim().to_string();
    Some(split_location(&text, is_us))
}

/// Disambiguates a comma-split location line
///
/// The line is nominally "City, State, Country" but the state only exists on
/// the US branch and city names may themselves contain commas:
/// - 3 tokens, US: taken verbatim
/// - 2 tokens: (city, -, country)
/// - 1 token: (-, -, country)
/// - anything else (including 3 tokens off the US branch): the last token is
///   the country, the second-to-last is the state on the US branch only, and
///   the remaining tokens rejoin into the city
fn split_location(text: &str, is_us: bool) -> (Option<String>, Option<String>, String) {
    let tokens: Vec<String> = text.split(',').map(|t| t.trim().to_string()).collect();

    match tokens.len() {
        3 if is_us => (
            Some(tokens[0].clone()),
            Some(tokens[1].clone()),
            tokens[2].clone(),
        ),
        2 => (Some(tokens[0].clone()), None, tokens[1].clone()),
        1 => (None, None, tokens[0].clone()),
        n => {
            let tail = if is_us { 2 } else { 1 };
            let city = tokens[..n - tail].join(", ");
            let state = if is_us {
                Some(tokens[n - 2].clone())
            } else {
                None
            };
            (Some(city), state, tokens[n - 1].clone())
        }
    }
}

/// Scans label cells and pairs each with the following sibling cell's text
///
/// A label is a `<td class="dataLabel">` whose trimmed text ends with ':';
/// the colon-stripped text becomes the key. The first occurrence of a key
/// wins; later duplicates are ignored.
fn extract_key_values(document: &Html) -> HashMap<String, String> {
    let mut values = HashMap::new();

    let selector = match Selector::parse("td[class]") {
        Ok(s) => s,
        Err(_) => return values,
    };

    for td in document.select(&selector) {
        if td.value().attr("class") != Some(DATA_LABEL_CLASS) {
            continue;
        }

        let label = td.text().collect::<String>().trim().to_string();
        let key = match label.strip_suffix(':') {
            Some(k) => k.to_string(),
            None => continue,
        };

        let next = td.next_siblings().filter_map(ElementRef::wrap).next();
        let next = match next {
            Some(el) if el.value().name() == "td" => el,
            _ => continue,
        };

        let value = next.text().collect::<String>().trim().to_string();
        values.entry(key).or_insert(value);
    }

    values
}

fn parse_coordinate(
    values: &HashMap<String, String>,
    field: &'static str,
) -> Result<f64, ParseError> {
    let value = values
        .get(field)
        .ok_or(ParseError::MissingCoordinate(field))?;
    value
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidCoordinate {
            field,
            value: value.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_page(location: &str, rows: &str) -> String {
        format!(
            r#"<html><body>
            <div class="code_box code_icao_box">KDSM</div>
            <div class="code_box code_iata_box">DSM</div>
            <div class="code_box code_faa_box">DSM</div>
            <table><tr><td><h1>Des Moines International Airport</h1></td></tr>
            <tr><td><h2>{location}</h2></td></tr></table>
            <table>{rows}</table>
            </body></html>"#
        )
    }

    fn coordinate_rows() -> &'static str {
        r#"<tr><td class="dataLabel">Latitude:</td><td>41.533972</td></tr>
           <tr><td class="dataLabel">Longitude:</td><td>-93.663083</td></tr>
           <tr><td class="dataLabel">Elevation:</td><td>958 ft</td></tr>"#
    }

    #[test]
    fn test_parse_complete_us_airport() {
        let html = detail_page("Des Moines, IA, USA", coordinate_rows());
        let airport = parse_airport(&html, true).unwrap();

        assert_eq!(airport.faa.as_deref(), Some("DSM"));
        assert_eq!(airport.iata.as_deref(), Some("DSM"));
        assert_eq!(airport.icao.as_deref(), Some("KDSM"));
        assert_eq!(airport.name, "Des Moines International Airport");
        assert_eq!(airport.city.as_deref(), Some("Des Moines"));
        assert_eq!(airport.state.as_deref(), Some("IA"));
        assert_eq!(airport.country, "USA");
        assert_eq!(airport.latitude, 41.533972);
        assert_eq!(airport.longitude, -93.663083);
        assert_eq!(airport.elevation, 958);
    }

    #[test]
    fn test_location_two_tokens_non_us() {
        let html = detail_page("Paris, France", coordinate_rows());
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.city.as_deref(), Some("Paris"));
        assert_eq!(airport.state, None);
        assert_eq!(airport.country, "France");
    }

    #[test]
    fn test_location_single_token() {
        let html = detail_page("Chad", coordinate_rows());
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.city, None);
        assert_eq!(airport.state, None);
        assert_eq!(airport.country, "Chad");
    }

    #[test]
    fn test_location_three_tokens_non_us_is_comma_city() {
        // off the US branch there is no state, so the first two tokens are
        // one city name containing a comma
        let html = detail_page("Villa, Rica, Colombia", coordinate_rows());
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.city.as_deref(), Some("Villa, Rica"));
        assert_eq!(airport.state, None);
        assert_eq!(airport.country, "Colombia");
    }

    #[test]
    fn test_location_four_tokens_us() {
        let html = detail_page("Washington, D.C., DC, USA", coordinate_rows());
        let airport = parse_airport(&html, true).unwrap();
        assert_eq!(airport.city.as_deref(), Some("Washington, D.C."));
        assert_eq!(airport.state.as_deref(), Some("DC"));
        assert_eq!(airport.country, "USA");
    }

    #[test]
    fn test_missing_codes() {
        let html = r#"<html><body><h1>Name</h1><h2>Chad</h2></body></html>"#;
        assert_eq!(parse_airport(html, false), Err(ParseError::MissingCodes));
    }

    #[test]
    fn test_missing_name() {
        let html = r#"<html><body>
            <div class="code_box code_faa_box">DSM</div>
            <h2>Chad</h2></body></html>"#;
        assert_eq!(parse_airport(html, false), Err(ParseError::MissingName));
    }

    #[test]
    fn test_blank_h1_is_missing_name() {
        let html = r#"<html><body>
            <div class="code_box code_faa_box">DSM</div>
            <h1>   </h1><h2>Chad</h2></body></html>"#;
        assert_eq!(parse_airport(html, false), Err(ParseError::MissingName));
    }

    #[test]
    fn test_missing_location() {
        let html = r#"<html><body>
            <div class="code_box code_faa_box">DSM</div>
            <h1>Name</h1></body></html>"#;
        assert_eq!(parse_airport(html, false), Err(ParseError::MissingLocation));
    }

    #[test]
    fn test_missing_latitude_is_fatal() {
        let rows = r#"<tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        assert_eq!(
            parse_airport(&html, false),
            Err(ParseError::MissingCoordinate("Latitude"))
        );
    }

    #[test]
    fn test_unparsable_longitude_is_fatal() {
        let rows = r#"<tr><td class="dataLabel">Latitude:</td><td>41.5</td></tr>
                      <tr><td class="dataLabel">Longitude:</td><td>west-ish</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        assert_eq!(
            parse_airport(&html, false),
            Err(ParseError::InvalidCoordinate {
                field: "Longitude",
                value: "west-ish".to_string()
            })
        );
    }

    #[test]
    fn test_missing_elevation_defaults_to_zero() {
        let rows = r#"<tr><td class="dataLabel">Latitude:</td><td>41.5</td></tr>
                      <tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.elevation, 0);
    }

    #[test]
    fn test_unparsable_elevation_defaults_to_zero() {
        let rows = r#"<tr><td class="dataLabel">Latitude:</td><td>41.5</td></tr>
                      <tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>
                      <tr><td class="dataLabel">Elevation:</td><td>unknown</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.elevation, 0);
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let rows = r#"<tr><td class="dataLabel">Latitude:</td><td>41.5</td></tr>
                      <tr><td class="dataLabel">Latitude:</td><td>99.9</td></tr>
                      <tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.latitude, 41.5);
    }

    #[test]
    fn test_label_without_colon_skipped() {
        let rows = r#"<tr><td class="dataLabel">Latitude</td><td>41.5</td></tr>
                      <tr><td class="dataLabel">Latitude:</td><td>40.0</td></tr>
                      <tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>"#;
        let html = detail_page("Paris, France", rows);
        let airport = parse_airport(&html, false).unwrap();
        assert_eq!(airport.latitude, 40.0);
    }

    #[test]
    fn test_codes_scan_stops_at_faa() {
        // a labeled box after the FAA box must be ignored
        let html = r#"<html><body>
            <div class="code_box code_iata_box">DSM</div>
            <div class="code_box code_faa_box">DSM</div>
            <div class="code_box code_icao_box">SHOULD-NOT-SCAN</div>
            <h1>Name</h1><h2>Paris, France</h2>
            <table>
              <tr><td class="dataLabel">Latitude:</td><td>41.5</td></tr>
              <tr><td class="dataLabel">Longitude:</td><td>-93.6</td></tr>
            </table>
            </body></html>"#;
        let airport = parse_airport(html, false).unwrap();
        assert_eq!(airport.iata.as_deref(), Some("DSM"));
        assert_eq!(airport.faa.as_deref(), Some("DSM"));
        assert_eq!(airport.icao, None);
    }

    #[test]
    fn test_absent_faa_still_parses() {
        let html = r#"<html><body>
            <div class="code_box code_icao_box">FTTJ</div>
            <h1>N'Djamena International Airport</h1>
            <h2>N'Djamena, Chad</h2>
            <table>
              <tr><td class="dataLabel">Latitude:</td><td>12.133</td></tr>
              <tr><td class="dataLabel">Longitude:</td><td>15.034</td></tr>
            </table>
            </body></html>"#;
        let airport = parse_airport(html, false).unwrap();
        assert_eq!(airport.faa, None);
        assert_eq!(airport.icao.as_deref(), Some("FTTJ"));
    }

    #[test]
    fn test_split_location_variants() {
        assert_eq!(
            split_location("Springfield, IL, USA", true),
            (
                Some("Springfield".to_string()),
                Some("IL".to_string()),
                "USA".to_string()
            )
        );
        assert_eq!(
            split_location("Paris, France", false),
            (Some("Paris".to_string()), None, "France".to_string())
        );
        assert_eq!(
            split_location("Washington, D.C., DC, USA", true),
            (
                Some("Washington, D.C.".to_string()),
                Some("DC".to_string()),
                "USA".to_string()
            )
        );
    }
}
