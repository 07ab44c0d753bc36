//! Configuration module for Indexing-Check
//!
//! Unlike a crawler with a config file, all configuration arrives on the
//! command line; this module holds the validated runtime settings and the
//! pre-flight checks that must pass before any URL is processed.

mod types;
mod validation;

pub use types::CheckConfig;
pub use validation::validate;
