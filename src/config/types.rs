use crate::check::{PolicyMode, UnknownAction};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for one check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Path to the newline-delimited URL input file
    pub input_file: PathBuf,

    /// Declared intended policy for every URL in the input file
    pub mode: PolicyMode,

    /// Severity assigned to a URL whose robots.txt could not be fetched
    pub on_unknown: UnknownAction,

    /// Maximum number of per-URL messages listed in the report
    pub max_error_messages: usize,

    /// Maximum number of URLs checked concurrently
    pub max_concurrent_checks: usize,

    /// Upper bound on every robots.txt and page fetch
    pub fetch_timeout: Duration,

    /// Dump per-URL outcomes as JSON to the log
    pub debug: bool,
}

impl CheckConfig {
    /// Creates a configuration with default limits for the given
    /// input file and policy mode
    pub fn new(input_file: PathBuf, mode: PolicyMode) -> Self {
        Self {
            input_file,
            mode,
            on_unknown: UnknownAction::Unknown,
            max_error_messages: 3,
            max_concurrent_checks: 8,
            fetch_timeout: Duration::from_secs(10),
            debug: false,
        }
    }
}
