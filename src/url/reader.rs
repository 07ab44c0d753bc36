//! URL source reader
//!
//! Reads the newline-delimited input file and produces the set of URL
//! candidates to check. Each line is stripped of trailing non-word
//! characters; lines that do not parse as absolute http(s) URLs with a host
//! are logged and dropped, and never count toward the report totals.

use crate::{CheckError, UrlError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use url::Url;

/// Reads URL candidates from the input file
///
/// # Arguments
///
/// * `path` - Path to a newline-delimited URL file
///
/// # Returns
///
/// The valid candidates in file order. Invalid lines are logged at WARN
/// level and excluded; blank lines are skipped silently.
pub fn read_candidates(path: &Path) -> Result<Vec<Url>, CheckError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut candidates = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let stripped = strip_trailing_nonword(&line);

        if stripped.is_empty() {
            continue;
        }

        match parse_candidate(stripped) {
            Ok(url) => candidates.push(url),
            Err(e) => tracing::warn!("Not an absolute uri: {} ({})", stripped, e),
        }
    }

    tracing::debug!(
        "Read {} url candidate(s) from {}",
        candidates.len(),
        path.display()
    );

    Ok(candidates)
}

/// Strips trailing non-word characters (anything outside `[A-Za-z0-9_]`)
/// from a line, covering newlines, stray punctuation, and whitespace
pub fn strip_trailing_nonword(line: &str) -> &str {
    line.trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_')
}

/// Parses one stripped line as an absolute http(s) URL with a host
fn parse_candidate(line: &str) -> Result<Url, UrlError> {
    let url = Url::parse(line).map_err(|e| UrlError::Parse(format!("{}: {}", line, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
