//! URL handling module for Indexing-Check
//!
//! This module turns raw input lines into syntactically valid absolute-URL
//! candidates and derives the per-origin cache key used for robots.txt
//! lookups.

mod origin;
mod reader;

pub use origin::OriginKey;
pub use reader::{read_candidates, strip_trailing_nonword};
