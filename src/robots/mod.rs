//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and run-scoped caching of
//! robots.txt directive sets, keyed by origin.

mod cache;
mod parser;

pub use cache::{RobotsCache, RobotsLookup};
pub use parser::RobotsDirectiveSet;

use crate::url::OriginKey;
use crate::CheckError;
use reqwest::Client;

/// Fetches and parses robots.txt for an origin
///
/// Any transport error, timeout, or non-2xx status is an error; the caller
/// (the cache) reports it as a fetch failure and the configured
/// unknown-handling policy applies. A 404 deliberately counts as a failure
/// here rather than as "no restrictions".
///
/// # Arguments
///
/// * `client` - The HTTP client to use (carries user agent and timeout)
/// * `origin` - The origin whose robots.txt should be fetched
pub async fn fetch_robots(
    client: &Client,
    origin: &OriginKey,
) -> Result<RobotsDirectiveSet, CheckError> {
    let robots_url = origin.robots_url();

    let response = client.get(&robots_url).send().await.map_err(|e| {
        if e.is_timeout() {
            CheckError::Timeout { url: robots_url.clone() }
        } else {
            CheckError::Http {
                url: robots_url.clone(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::RobotsUnavailable {
            origin: origin.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| CheckError::Http {
        url: robots_url,
        source: e,
    })?;

    Ok(RobotsDirectiveSet::from_content(&body))
}
