//! Robots.txt directive set
//!
//! This module wraps the robotstxt crate behind an immutable per-origin
//! directive set. Matching follows standard exclusion-protocol semantics:
//! the longest matching path prefix wins, and an Allow beats a Disallow of
//! equal specificity.

use chrono::{DateTime, Utc};
use robotstxt::DefaultMatcher;

/// Compiled robots.txt directives for one origin
///
/// Built once per origin per run and never mutated afterwards. Stores the
/// raw robots.txt content along with the timestamp it was fetched.
#[derive(Debug, Clone)]
pub struct RobotsDirectiveSet {
    /// Raw robots.txt content (empty means no restrictions)
    content: String,

    /// When the robots.txt was fetched
    fetched_at: DateTime<Utc>,
}

impl RobotsDirectiveSet {
    /// Creates a directive set from raw robots.txt content, stamped with
    /// the current time
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Returns when this directive set was fetched
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Checks whether a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL or path to check (e.g. "https://example.com/page"
    ///   or "/page")
    /// * `user_agent` - The user agent string
    pub fn allows(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            // No directives means no restrictions
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_allows_all() {
        let robots = RobotsDirectiveSet::from_content("");
        assert!(robots.allows("/any/path", "TestBot"));
        assert!(robots.allows("/admin", "TestBot"));
    }

    #[test]
    fn test_disallow_all() {
        let robots = RobotsDirectiveSet::from_content("User-agent: *\nDisallow: /");
        assert!(!robots.allows("/", "TestBot"));
        assert!(!robots.allows("/page", "TestBot"));
    }

    #[test]
    fn test_disallow_prefix() {
        let robots = RobotsDirectiveSet::from_content("User-agent: *\nDisallow: /private");
        assert!(!robots.allows("/private/x", "TestBot"));
        assert!(!robots.allows("/private", "TestBot"));
        assert!(robots.allows("/public", "TestBot"));
        assert!(robots.allows("/", "TestBot"));
    }

    #[test]
    fn test_longest_match_wins() {
        let robots = RobotsDirectiveSet::from_content(
            "User-agent: *\nDisallow: /private\nAllow: /private/public",
        );
        assert!(!robots.allows("/private", "TestBot"));
        assert!(!robots.allows("/private/other", "TestBot"));
        assert!(robots.allows("/private/public", "TestBot"));
    }

    #[test]
    fn test_specific_user_agent_group() {
        let robots = RobotsDirectiveSet::from_content(
            "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(robots.allows("/page", "GoodBot"));
        assert!(!robots.allows("/page", "BadBot"));
    }

    #[test]
    fn test_full_url_argument() {
        let robots = RobotsDirectiveSet::from_content("User-agent: *\nDisallow: /private");
        assert!(!robots.allows("https://example.com/private/x", "TestBot"));
        assert!(robots.allows("https://example.com/public", "TestBot"));
    }

    #[test]
    fn test_garbage_content_allows() {
        let robots = RobotsDirectiveSet::from_content("This is not valid robots.txt {{{");
        assert!(robots.allows("/any/path", "TestBot"));
    }

    #[test]
    fn test_fetched_at_is_recent() {
        let robots = RobotsDirectiveSet::from_content("");
        let age = Utc::now() - robots.fetched_at();
        assert!(age.num_seconds() < 5);
    }
}
