//! HTTP fetcher
//!
//! Builds the shared HTTP client and fetches page bodies, classifying
//! failures so the caller can tell a timeout from a refused connection.
//! Every request is bounded by the configured timeout; no failure here is
//! ever fatal to the run.

use reqwest::Client;
use std::time::Duration;

/// Result of a page fetch
#[derive(Debug)]
pub enum PageFetch {
    /// Successfully fetched the page body
    Success {
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// The request exceeded the configured timeout
    Timeout,

    /// Network error (connection refused, TLS failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by robots.txt and page fetches
///
/// # Arguments
///
/// * `user_agent` - The user agent string to send
/// * `timeout` - Upper bound applied to every request
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A PageFetch indicating success or the type of failure
pub async fn fetch_page(client: &Client, url: &str) -> PageFetch {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return PageFetch::HttpError {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => PageFetch::Success {
                    status: status.as_u16(),
                    body,
                },
                Err(e) => PageFetch::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                PageFetch::Timeout
            } else if e.is_connect() {
                PageFetch::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                PageFetch::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}
