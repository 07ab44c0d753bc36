//! Result aggregator
//!
//! Folds all per-URL outcomes into one report. Outcomes are bucketed by
//! severity preserving input order; the report takes the severity of the
//! first non-empty bucket in precedence order and lists that bucket's
//! messages, truncated to the configured maximum. Counts are never
//! truncated.

use crate::check::evaluator::{Outcome, Severity};
use serde::Serialize;

/// Untruncated per-severity outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
    pub unknown: usize,
}

impl SeverityCounts {
    /// Count for one severity bucket
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Ok => self.ok,
            Severity::Warning => self.warning,
            Severity::Critical => self.critical,
            Severity::Unknown => self.unknown,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Ok => self.ok += 1,
            Severity::Warning => self.warning += 1,
            Severity::Critical => self.critical += 1,
            Severity::Unknown => self.unknown += 1,
        }
    }
}

/// Final monitoring report for one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Highest-precedence non-empty severity
    pub severity: Severity,

    /// Messages of the chosen bucket, truncated to the configured maximum
    pub messages: Vec<String>,

    /// True per-severity outcome counts
    pub counts: SeverityCounts,

    /// Number of URLs processed
    pub total_urls: usize,
}

/// Aggregates per-URL outcomes into one report
///
/// # Arguments
///
/// * `outcomes` - All outcomes, in input order
/// * `max_error_messages` - Bound on the number of listed messages
pub fn aggregate(outcomes: &[Outcome], max_error_messages: usize) -> Report {
    let mut counts = SeverityCounts::default();
    for outcome in outcomes {
        counts.bump(outcome.severity);
    }

    let severity = Severity::PRECEDENCE
        .into_iter()
        .find(|s| counts.get(*s) > 0)
        .unwrap_or(Severity::Ok);

    let messages: Vec<String> = outcomes
        .iter()
        .filter(|o| o.severity == severity)
        .flat_map(|o| o.messages.iter().cloned())
        .take(max_error_messages)
        .collect();

    Report {
        severity,
        messages,
        counts,
        total_urls: outcomes.len(),
    }
}

impl Report {
    /// Renders the one-line summary (message listing joined below it)
    ///
    /// Formats follow the original plugin output: the found-counts clause
    /// names the chosen severity's count, plus the unknown count for
    /// CRITICAL and WARNING reports.
    pub fn render(&self) -> String {
        match self.severity {
            Severity::Ok => format!("OK: no errors found in {} urls", self.total_urls),
            Severity::Critical => format!(
                "CRITICAL: found {} criticals, {} unknowns in {} urls, listing {} critical(s):\n{}",
                self.counts.critical,
                self.counts.unknown,
                self.total_urls,
                self.messages.len(),
                self.messages.join("\n")
            ),
            Severity::Warning => format!(
                "WARNING: found {} warnings, {} unknowns in {} urls, listing {} warning(s):\n{}",
                self.counts.warning,
                self.counts.unknown,
                self.total_urls,
                self.messages.len(),
                self.messages.join("\n")
            ),
            Severity::Unknown => format!(
                "UNKNOWN: found {} unknowns in {} urls, listing {} unknown(s):\n{}",
                self.counts.unknown,
                self.total_urls,
                self.messages.len(),
                self.messages.join("\n")
            ),
        }
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(url: &str, severity: Severity, messages: &[&str]) -> Outcome {
        Outcome {
            url: url.to_string(),
            severity,
            messages: messages.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn ok(url: &str) -> Outcome {
        outcome(url, Severity::Ok, &[])
    }

    #[test]
    fn test_empty_input_is_ok() {
        let report = aggregate(&[], 3);
        assert_eq!(report.severity, Severity::Ok);
        assert_eq!(report.total_urls, 0);
        assert!(report.messages.is_empty());
        assert_eq!(report.render(), "OK: no errors found in 0 urls");
    }

    #[test]
    fn test_all_ok_synthesized_message() {
        let outcomes = vec![ok("https://a.example/"), ok("https://b.example/")];
        let report = aggregate(&outcomes, 3);
        assert_eq!(report.severity, Severity::Ok);
        assert_eq!(report.render(), "OK: no errors found in 2 urls");
    }

    #[test]
    fn test_truncation_keeps_true_counts() {
        let outcomes: Vec<Outcome> = (0..5)
            .map(|i| {
                outcome(
                    &format!("https://example.com/{}", i),
                    Severity::Critical,
                    &[&format!("robots.txt forbid indexing of url{}", i)],
                )
            })
            .collect();

        let report = aggregate(&outcomes, 3);
        assert_eq!(report.severity, Severity::Critical);
        assert_eq!(report.messages.len(), 3);
        assert_eq!(report.counts.critical, 5);
        assert_eq!(report.total_urls, 5);
    }

    #[test]
    fn test_messages_preserve_input_order() {
        let outcomes = vec![
            outcome("https://x/1", Severity::Critical, &["first"]),
            ok("https://x/2"),
            outcome("https://x/3", Severity::Critical, &["second", "third"]),
        ];
        let report = aggregate(&outcomes, 10);
        assert_eq!(report.messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_critical_outranks_warning_and_unknown() {
        let outcomes = vec![
            outcome("https://x/1", Severity::Unknown, &["u"]),
            outcome("https://x/2", Severity::Warning, &["w"]),
            outcome("https://x/3", Severity::Critical, &["c"]),
        ];
        let report = aggregate(&outcomes, 3);
        assert_eq!(report.severity, Severity::Critical);
        assert_eq!(report.messages, vec!["c"]);
        assert_eq!(report.counts.unknown, 1);
        assert_eq!(report.counts.warning, 1);
    }

    #[test]
    fn test_warning_outranks_unknown() {
        let outcomes = vec![
            outcome("https://x/1", Severity::Unknown, &["u"]),
            outcome("https://x/2", Severity::Warning, &["w"]),
        ];
        let report = aggregate(&outcomes, 3);
        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.messages, vec!["w"]);
    }

    #[test]
    fn test_render_critical_line() {
        let outcomes = vec![
            outcome("https://x/1", Severity::Critical, &["msg one"]),
            outcome("https://x/2", Severity::Unknown, &["msg two"]),
            ok("https://x/3"),
        ];
        let report = aggregate(&outcomes, 3);
        assert_eq!(
            report.render(),
            "CRITICAL: found 1 criticals, 1 unknowns in 3 urls, listing 1 critical(s):\nmsg one"
        );
    }

    #[test]
    fn test_render_warning_line() {
        let outcomes = vec![outcome("https://x/1", Severity::Warning, &["w1"])];
        let report = aggregate(&outcomes, 3);
        assert_eq!(
            report.render(),
            "WARNING: found 1 warnings, 0 unknowns in 1 urls, listing 1 warning(s):\nw1"
        );
    }

    #[test]
    fn test_render_unknown_line() {
        let outcomes = vec![
            outcome("https://x/1", Severity::Unknown, &["u1"]),
            outcome("https://x/2", Severity::Unknown, &["u2"]),
        ];
        let report = aggregate(&outcomes, 1);
        assert_eq!(
            report.render(),
            "UNKNOWN: found 2 unknowns in 2 urls, listing 1 unknown(s):\nu1"
        );
    }

    #[test]
    fn test_exit_code_follows_severity() {
        let outcomes = vec![outcome("https://x/1", Severity::Critical, &["c"])];
        assert_eq!(aggregate(&outcomes, 3).exit_code(), 2);
        assert_eq!(aggregate(&[], 3).exit_code(), 0);
    }
}
