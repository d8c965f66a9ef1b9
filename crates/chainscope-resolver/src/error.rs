//! Error types for resolver construction
//!
//! Resolution itself never fails; only building a resolver from
//! user-supplied configuration can.

use thiserror::Error;

/// Errors that can occur while building a resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Configuration error (weight or threshold out of range)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A known-chain or indicator pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
