//! Configuration validation
//!
//! All validation failures here are fatal: the crawler refuses to start with
//! a broken configuration rather than discovering problems mid-crawl.

use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks:
/// - `database-path` is non-empty
/// - `base-url` parses as an http/https URL
/// - the starting scope narrows outer-to-inner (state implies country,
///   country implies continent)
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.output.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.database-path must not be empty".to_string(),
        ));
    }

    let base = Url::parse(&config.site.base_url)
        .map_err(|e| ConfigError::Validation(format!("site.base-url is not a valid URL: {}", e)))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "site.base-url must use http or https, got {}",
            base.scheme()
        )));
    }

    if config.scope.state.is_some() && config.scope.country.is_none() {
        return Err(ConfigError::Validation(
            "scope.state requires scope.country".to_string(),
        ));
    }
    if config.scope.country.is_some() && config.scope.continent.is_none() {
        return Err(ConfigError::Validation(
            "scope.country requires scope.continent".to_string(),
        ));
    }

    Ok(())
}
