//! Aerodex: an airport directory crawler
//!
//! This crate walks a paginated, hierarchically-organized airport directory
//! (continent -> country -> optional state -> result page -> airport detail)
//! and files structured airport records into a SQLite database.

pub mod address;
pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for aerodex operations
#[derive(Debug, Error)]
pub enum AerodexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Frontier error: {0}")]
    Frontier(#[from] crawler::FrontierError),

    #[error("Parse error: {0}")]
    Parse(#[from] crawler::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for aerodex operations
pub type Result<T> = std::result::Result<T, AerodexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use address::{encode_continent, encode_country, encode_state, SiteUrls};
pub use config::Config;
pub use crawler::{Crawler, Frontier, Level};
pub use storage::{Airport, AirportStore, InsertOutcome};
