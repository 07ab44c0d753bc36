//! Robots meta directive extractor
//!
//! Fetches a page and extracts the tokens of its `<meta name="robots">`
//! tag. The result is deliberately three-state: a page with no tag and a
//! page that could not be fetched are different facts, even though the
//! evaluator treats both as "no opinion from meta".

use crate::check::fetcher::{fetch_page, PageFetch};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// Robots meta directives for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MetaDirectives {
    /// A robots meta tag was found; holds its lowercase content tokens.
    /// An empty token list means the tag was present with empty content.
    Present(Vec<String>),

    /// The page was fetched but carries no robots meta tag
    Absent,

    /// The page could not be fetched
    FetchFailed,
}

impl MetaDirectives {
    /// Whether the meta directives allow indexing
    ///
    /// `None` means meta has no opinion (tag absent or page unreachable)
    /// and is excluded from violation checks.
    pub fn allows_indexing(&self) -> Option<bool> {
        match self {
            MetaDirectives::Present(tokens) => Some(!tokens.iter().any(|t| t == "noindex")),
            MetaDirectives::Absent | MetaDirectives::FetchFailed => None,
        }
    }
}

/// Fetches a page and extracts its robots meta directives
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
pub async fn extract_meta(client: &Client, url: &Url) -> MetaDirectives {
    match fetch_page(client, url.as_str()).await {
        PageFetch::Success { body, .. } => parse_meta_directives(&body),
        PageFetch::HttpError { status } => {
            tracing::debug!("Page fetch for {} returned HTTP {}", url, status);
            MetaDirectives::FetchFailed
        }
        PageFetch::Timeout => {
            tracing::debug!("Page fetch for {} timed out", url);
            MetaDirectives::FetchFailed
        }
        PageFetch::NetworkError { error } => {
            tracing::debug!("Page fetch for {} failed: {}", url, error);
            MetaDirectives::FetchFailed
        }
    }
}

/// Parses HTML and extracts robots meta directive tokens
///
/// The name attribute is matched case-insensitively; when several robots
/// meta tags are present the last one wins. Content is stripped of all
/// whitespace, split on commas, and lowercased.
pub fn parse_meta_directives(html: &str) -> MetaDirectives {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("meta[name]") {
        Ok(s) => s,
        Err(_) => return MetaDirectives::Absent,
    };

    let robots_tag = document
        .select(&selector)
        .filter(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("robots"))
        })
        .last();

    match robots_tag {
        Some(element) => match element.value().attr("content") {
            Some(content) => MetaDirectives::Present(tokenize(content)),
            None => MetaDirectives::Absent,
        },
        None => MetaDirectives::Absent,
    }
}

/// Splits a content attribute into normalized directive tokens
fn tokenize(content: &str) -> Vec<String> {
    let stripped: String = content.chars().filter(|c| !c.is_whitespace()).collect();

    stripped
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| token.to_ascii_lowercase())
        .collect()
}
