//! Policy evaluator
//!
//! Combines one URL's robots.txt verdict and meta directive tokens with the
//! declared policy mode into a single outcome. Each source is checked
//! independently; when both object, both messages are kept.

use crate::check::meta::MetaDirectives;
use crate::robots::RobotsLookup;
use clap::ValueEnum;
use serde::Serialize;
use url::Url;

/// Declared intended indexing policy for the checked URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum PolicyMode {
    /// URLs are expected to be indexable
    #[value(name = "index")]
    AllowIndexing,

    /// URLs are expected to be hidden from indexing
    #[value(name = "noindex")]
    ForbidIndexing,
}

/// Severity assigned to a URL whose robots.txt could not be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum UnknownAction {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl UnknownAction {
    /// The severity this action maps to
    pub fn severity(self) -> Severity {
        match self {
            UnknownAction::Ok => Severity::Ok,
            UnknownAction::Warning => Severity::Warning,
            UnknownAction::Critical => Severity::Critical,
            UnknownAction::Unknown => Severity::Unknown,
        }
    }
}

/// Outcome severity, following monitoring-plugin conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Report precedence, highest first: a report takes the severity of
    /// its first non-empty bucket in this order
    pub const PRECEDENCE: [Severity; 4] = [
        Severity::Critical,
        Severity::Warning,
        Severity::Unknown,
        Severity::Ok,
    ];

    /// Monitoring-standard process exit code for this severity
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// Uppercase label used in the report line
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

/// Result of evaluating one URL against the declared policy
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// The checked URL
    pub url: String,

    /// Severity of this URL's posture
    pub severity: Severity,

    /// Source-attributed violation messages, in check order
    pub messages: Vec<String>,
}

/// Evaluates one URL's indexing posture against the declared mode
///
/// If robots.txt could not be fetched the outcome takes the configured
/// unknown action and evaluation stops there. Otherwise both sources are
/// checked independently:
/// - robots.txt either allows or disallows the URL for our user agent
/// - meta directives allow, forbid, or (when the tag is absent or the page
///   unreachable) have no opinion and are excluded from violation checks
///
/// Any violation makes the outcome CRITICAL; messages from both sources
/// are concatenated, never mutually exclusive.
///
/// # Arguments
///
/// * `url` - The checked URL
/// * `mode` - The declared policy mode
/// * `robots` - Cache lookup result for the URL's origin
/// * `meta` - Extracted meta directives for the URL
/// * `on_unknown` - Severity to assign when robots.txt is unreachable
/// * `user_agent` - User agent the directives are matched against
pub fn evaluate(
    url: &Url,
    mode: PolicyMode,
    robots: &RobotsLookup,
    meta: &MetaDirectives,
    on_unknown: UnknownAction,
    user_agent: &str,
) -> Outcome {
    let directives = match robots {
        RobotsLookup::Directives(set) => set,
        RobotsLookup::FetchFailed => {
            return Outcome {
                url: url.to_string(),
                severity: on_unknown.severity(),
                messages: vec![format!("Failed to get robots for {}", url)],
            };
        }
    };

    let robots_allows = directives.allows(url.as_str(), user_agent);
    let meta_allows = meta.allows_indexing();

    let mut messages = Vec::new();

    match mode {
        PolicyMode::AllowIndexing => {
            if meta_allows == Some(false) {
                messages.push(format!("Meta tags forbid indexing of {}", url));
            }
            if !robots_allows {
                messages.push(format!("robots.txt forbid indexing of {}", url));
            }
        }
        PolicyMode::ForbidIndexing => {
            if meta_allows == Some(true) {
                messages.push(format!("Meta tags allow indexing of {}", url));
            }
            if robots_allows {
                messages.push(format!("robots.txt allow indexing of {}", url));
            }
        }
    }

    let severity = if messages.is_empty() {
        Severity::Ok
    } else {
        Severity::Critical
    };

    Outcome {
        url: url.to_string(),
        severity,
        messages,
    }
}
