//! Per-origin robots.txt cache with single-flight fetching
//!
//! One directive set is fetched at most once per origin per run. Concurrent
//! requests for the same origin share the in-flight fetch instead of
//! re-issuing it; later requesters of an already-populated entry take only
//! a shared read lock. Failures are reported to every waiting caller but
//! never memoized, so each caller applies the configured unknown-handling
//! policy independently.

use crate::robots::{fetch_robots, RobotsDirectiveSet};
use crate::url::OriginKey;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::{watch, Mutex};

/// Result of a cache lookup
#[derive(Debug, Clone)]
pub enum RobotsLookup {
    /// Directive set for the origin, shared across all URLs on it
    Directives(Arc<RobotsDirectiveSet>),

    /// robots.txt could not be fetched or parsed
    FetchFailed,
}

type FlightReceiver = watch::Receiver<Option<RobotsLookup>>;

/// Run-scoped robots.txt cache keyed by origin
pub struct RobotsCache {
    client: Client,

    /// Successfully fetched directive sets; reads are lock-free in the
    /// sense of taking only the shared side of the RwLock
    ready: RwLock<HashMap<OriginKey, Arc<RobotsDirectiveSet>>>,

    /// Single-flight guard: one watch channel per origin currently being
    /// fetched
    inflight: Mutex<HashMap<OriginKey, FlightReceiver>>,
}

enum FlightRole {
    Leader(watch::Sender<Option<RobotsLookup>>),
    Waiter(FlightReceiver),
}

impl RobotsCache {
    /// Creates a cache that fetches through the given client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            ready: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up the directive set for an origin, fetching it on first use
    ///
    /// On a miss, the first caller becomes the fetch leader; concurrent
    /// callers for the same origin wait on the leader's result. A
    /// successful fetch is memoized for the rest of the run. A failed fetch
    /// is delivered to the leader and all current waiters, but the next
    /// fresh request for that origin will try again.
    pub async fn get(&self, origin: &OriginKey) -> RobotsLookup {
        if let Some(set) = self.ready.read().unwrap().get(origin) {
            return RobotsLookup::Directives(set.clone());
        }

        let role = {
            let mut inflight = self.inflight.lock().await;

            // A leader may have finished between the read above and taking
            // the inflight lock
            if let Some(set) = self.ready.read().unwrap().get(origin) {
                return RobotsLookup::Directives(set.clone());
            }

            if let Some(rx) = inflight.get(origin) {
                FlightRole::Waiter(rx.clone())
            } else {
                let (tx, rx) = watch::channel(None);
                inflight.insert(origin.clone(), rx);
                FlightRole::Leader(tx)
            }
        };

        match role {
            FlightRole::Leader(tx) => self.lead_fetch(origin, tx).await,
            FlightRole::Waiter(rx) => Self::await_leader(rx).await,
        }
    }

    /// Performs the fetch as the single in-flight leader for this origin
    async fn lead_fetch(
        &self,
        origin: &OriginKey,
        tx: watch::Sender<Option<RobotsLookup>>,
    ) -> RobotsLookup {
        tracing::debug!("Fetching robots.txt for origin: {}", origin);

        let result = match fetch_robots(&self.client, origin).await {
            Ok(set) => {
                let set = Arc::new(set);
                self.ready
                    .write()
                    .unwrap()
                    .insert(origin.clone(), set.clone());
                RobotsLookup::Directives(set)
            }
            Err(e) => {
                tracing::warn!("Failed to get robots for origin {}: {}", origin, e);
                RobotsLookup::FetchFailed
            }
        };

        // Successful results are already in `ready`, so a caller arriving
        // after this removal hits the fast path; after a failure it starts
        // a fresh flight instead of reusing a stale verdict.
        self.inflight.lock().await.remove(origin);
        let _ = tx.send(Some(result.clone()));

        result
    }

    /// Waits for the in-flight leader to publish its result
    async fn await_leader(mut rx: FlightReceiver) -> RobotsLookup {
        loop {
            let published = rx.borrow().clone();
            if let Some(result) = published {
                return result;
            }

            // A dropped sender means the leader task died before publishing
            if rx.changed().await.is_err() {
                return RobotsLookup::FetchFailed;
            }
        }
    }

    /// Number of origins with a memoized directive set
    pub fn len(&self) -> usize {
        self.ready.read().unwrap().len()
    }

    /// Returns true if no directive set has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.ready.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    fn origin_of(uri: &str) -> OriginKey {
        OriginKey::from_url(&Url::parse(uri).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_success_memoized_single_fetch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = RobotsCache::new(test_client());
        let origin = origin_of(&server.uri());

        for _ in 0..3 {
            match cache.get(&origin).await {
                RobotsLookup::Directives(set) => {
                    assert!(!set.allows("/private/x", "TestBot"));
                    assert!(set.allows("/public", "TestBot"));
                }
                RobotsLookup::FetchFailed => panic!("expected directives"),
            }
        }

        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_share_one_flight() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("User-agent: *\nAllow: /")
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cache = Arc::new(RobotsCache::new(test_client()));
        let origin = origin_of(&server.uri());

        let a = {
            let cache = cache.clone();
            let origin = origin.clone();
            tokio::spawn(async move { cache.get(&origin).await })
        };
        let b = {
            let cache = cache.clone();
            let origin = origin.clone();
            tokio::spawn(async move { cache.get(&origin).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(matches!(a, RobotsLookup::Directives(_)));
        assert!(matches!(b, RobotsLookup::Directives(_)));
    }

    #[tokio::test]
    async fn test_failure_not_memoized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let cache = RobotsCache::new(test_client());
        let origin = origin_of(&server.uri());

        assert!(matches!(cache.get(&origin).await, RobotsLookup::FetchFailed));
        // A second sequential request must try again
        assert!(matches!(cache.get(&origin).await, RobotsLookup::FetchFailed));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_origins_fetch_separately() {
        let server_a = MockServer::start().await;
        let server_b = MockServer::start().await;

        for server in [&server_a, &server_b] {
            Mock::given(method("GET"))
                .and(path("/robots.txt"))
                .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /"))
                .expect(1)
                .mount(server)
                .await;
        }

        let cache = RobotsCache::new(test_client());
        cache.get(&origin_of(&server_a.uri())).await;
        cache.get(&origin_of(&server_b.uri())).await;

        assert_eq!(cache.len(), 2);
    }
}
