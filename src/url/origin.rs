//! Origin keys for robots.txt authorities
//!
//! One robots.txt governs one origin (scheme + host, plus an explicit port
//! when the URL carries one). All URLs sharing an origin share one cached
//! directive set per run.

use std::fmt;
use url::Url;

/// Identifies one robots.txt authority
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginKey {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl OriginKey {
    /// Derives the origin key from a parsed URL
    ///
    /// Returns `None` for URLs without a host (e.g. `mailto:`), which the
    /// reader already rejects. Default ports are normalized away by the
    /// `url` crate, so `https://example.com:443/` and `https://example.com/`
    /// share a key.
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        Some(Self {
            scheme: url.scheme().to_string(),
            host: host.to_ascii_lowercase(),
            port: url.port(),
        })
    }

    /// Returns the robots.txt URL for this origin
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self)
    }
}

impl fmt::Display for OriginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}://{}:{}", self.scheme, self.host, port),
            None => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> OriginKey {
        OriginKey::from_url(&Url::parse(url).unwrap()).unwrap()
    }

    #[test]
    fn test_same_origin_different_paths() {
        assert_eq!(key("https://example.com/a"), key("https://example.com/b?q=1"));
    }

    #[test]
    fn test_scheme_distinguishes_origins() {
        assert_ne!(key("http://example.com/"), key("https://example.com/"));
    }

    #[test]
    fn test_explicit_port_distinguishes_origins() {
        assert_ne!(key("http://example.com:8080/"), key("http://example.com/"));
    }

    #[test]
    fn test_default_port_normalized() {
        assert_eq!(key("https://example.com:443/"), key("https://example.com/"));
    }

    #[test]
    fn test_host_case_insensitive() {
        assert_eq!(key("https://Example.COM/"), key("https://example.com/"));
    }

    #[test]
    fn test_robots_url() {
        assert_eq!(
            key("https://example.com/deep/page").robots_url(),
            "https://example.com/robots.txt"
        );
        assert_eq!(
            key("http://127.0.0.1:8080/x").robots_url(),
            "http://127.0.0.1:8080/robots.txt"
        );
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:test@example.com").unwrap();
        assert!(OriginKey::from_url(&url).is_none());
    }
}
