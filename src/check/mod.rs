//! Check module - per-URL policy evaluation and report aggregation
//!
//! This module contains the core check pipeline:
//! - Fetching page bodies with bounded timeouts
//! - Extracting `<meta name="robots">` directive tokens
//! - Evaluating each URL's posture against the declared policy mode
//! - Aggregating outcomes into one severity-classified report

mod aggregator;
mod evaluator;
mod fetcher;
mod meta;
mod runner;

pub use aggregator::{aggregate, Report, SeverityCounts};
pub use evaluator::{evaluate, Outcome, PolicyMode, Severity, UnknownAction};
pub use fetcher::{build_http_client, fetch_page, PageFetch};
pub use meta::{extract_meta, parse_meta_directives, MetaDirectives};
pub use runner::{check_url, run_check};
