//! Indexing-Check: a monitoring plugin for indexing posture
//!
//! This crate audits whether a batch of URLs is allowed or forbidden to be
//! indexed, by combining each origin's robots.txt directives with per-page
//! `<meta name="robots">` directives, and renders one Nagios-style report
//! line with a matching exit code.

pub mod check;
pub mod config;
pub mod robots;
pub mod url;

use thiserror::Error;

/// User agent sent with every robots.txt and page request
pub const USER_AGENT: &str = concat!("indexing-check/", env!("CARGO_PKG_VERSION"));

/// Main error type for Indexing-Check operations
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("robots.txt for {origin} returned HTTP {status}")]
    RobotsUnavailable { origin: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// All of these are fatal: they are reported before any URL is processed
/// and map to the UNKNOWN exit code.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File: {0} does not exist")]
    MissingFile(String),

    #[error("File: {0} is not readable")]
    NotReadable(String),

    #[error("{0} is a directory!")]
    IsDirectory(String),

    #[error("File: {0} is empty")]
    EmptyFile(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Indexing-Check operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use check::{
    aggregate, evaluate, run_check, MetaDirectives, Outcome, PolicyMode, Report, Severity,
    SeverityCounts, UnknownAction,
};
pub use config::CheckConfig;
pub use robots::{RobotsCache, RobotsDirectiveSet, RobotsLookup};
pub use url::OriginKey;
