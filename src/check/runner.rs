//! Check run orchestration
//!
//! Reads the URL candidates, checks each one on a bounded worker pool, and
//! aggregates the collected outcomes into the final report. Per-URL work is
//! independent: the robots.txt lookup (through the shared per-origin cache)
//! and the page fetch for meta extraction run concurrently for each URL.
//! Outcomes land in an indexed slot vector so the report's message order
//! and truncation stay deterministic regardless of completion order.

use crate::check::aggregator::{aggregate, Report};
use crate::check::evaluator::{evaluate, Outcome, PolicyMode, UnknownAction};
use crate::check::fetcher::build_http_client;
use crate::check::meta::{extract_meta, MetaDirectives};
use crate::config::CheckConfig;
use crate::robots::{RobotsCache, RobotsLookup};
use crate::url::{read_candidates, OriginKey};
use crate::{CheckError, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Runs one complete check: read, check, aggregate
///
/// # Arguments
///
/// * `config` - Validated runtime configuration
///
/// # Returns
///
/// * `Ok(Report)` - The aggregated report, ready to render
/// * `Err(CheckError)` - Pre-processing failed (input file unreadable or
///   the HTTP client could not be built); per-URL failures never surface
///   here
pub async fn run_check(config: &CheckConfig) -> Result<Report, CheckError> {
    let candidates = read_candidates(&config.input_file)?;
    tracing::info!(
        "Checking {} urls in {:?} mode",
        candidates.len(),
        config.mode
    );

    let client = build_http_client(USER_AGENT, config.fetch_timeout)?;
    let cache = Arc::new(RobotsCache::new(client.clone()));
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_checks));

    let mut tasks = JoinSet::new();

    for (index, url) in candidates.iter().cloned().enumerate() {
        let client = client.clone();
        let cache = cache.clone();
        let semaphore = semaphore.clone();
        let mode = config.mode;
        let on_unknown = config.on_unknown;

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.unwrap();
            tracing::debug!("processing: {}", url);
            let outcome = check_url(&client, &cache, &url, mode, on_unknown).await;
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<Outcome>> = (0..candidates.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.map_err(|e| CheckError::Worker(e.to_string()))?;
        slots[index] = Some(outcome);
    }

    let outcomes: Vec<Outcome> = slots.into_iter().flatten().collect();

    if config.debug {
        match serde_json::to_string_pretty(&outcomes) {
            Ok(json) => tracing::debug!("per-url outcomes:\n{}", json),
            Err(e) => tracing::warn!("Failed to serialize outcomes: {}", e),
        }
    }

    tracing::info!(
        "Collected {} outcome(s), {} origin(s) cached",
        outcomes.len(),
        cache.len()
    );

    // Aggregation runs single-threaded after every worker has finished
    Ok(aggregate(&outcomes, config.max_error_messages))
}

/// Checks one URL against the declared policy
///
/// The robots.txt lookup and the page fetch are joined concurrently; both
/// degrade to their fetch-failed states on any error, never aborting the
/// run.
pub async fn check_url(
    client: &Client,
    cache: &RobotsCache,
    url: &Url,
    mode: PolicyMode,
    on_unknown: UnknownAction,
) -> Outcome {
    let (robots, meta) = match OriginKey::from_url(url) {
        Some(origin) => tokio::join!(cache.get(&origin), extract_meta(client, url)),
        // The reader only admits http(s) URLs with a host, so this is
        // unreachable in practice; degrade like an unreachable origin.
        None => (RobotsLookup::FetchFailed, MetaDirectives::FetchFailed),
    };

    evaluate(url, mode, &robots, &meta, on_unknown, USER_AGENT)
}
