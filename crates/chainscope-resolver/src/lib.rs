//! Chainscope Resolver
//!
//! Chain and franchise entity resolution: decides whether superficially
//! different business records ("Subway #4521", "Miami Subway") are locations
//! of the same chain, and groups them into clusters with confidence scores and
//! per-member roles.
//!
//! # Overview
//!
//! Resolution of one record runs these signals against a candidate pool:
//!
//! | Signal | Default weight | Adds to matched set |
//! |--------|----------------|---------------------|
//! | Known brand pattern | 0.40 | no |
//! | Franchise indicators | 0.20 | no |
//! | Similar name (per record, ≥ 0.75) | 0.15 | yes |
//! | Shared phone prefix | 0.10 | yes |
//! | Shared website domain | 0.25 | yes |
//! | Matched record within 50 miles | 0.10 | no |
//!
//! The sum is clamped to [0, 1]. A record is a chain when its confidence
//! reaches 0.5 or it matched at least two other records.
//!
//! The engine is pure: no I/O, no shared mutable state, and every extractor
//! is total. Only construction from user configuration can fail.
//!
//! # Usage
//!
//! ## Single Record
//!
//! ```
//! use chainscope_domain::BusinessRecord;
//! use chainscope_resolver::detect_chain;
//!
//! let subject = BusinessRecord::new("1", "Miami Subway");
//! let result = detect_chain(&subject, &[]);
//! assert!(result.is_chain);
//! ```
//!
//! ## Batch Clustering
//!
//! ```
//! use chainscope_domain::BusinessRecord;
//! use chainscope_resolver::cluster_businesses;
//!
//! let records = vec![
//!     BusinessRecord::new("1", "Subway #4521"),
//!     BusinessRecord::new("2", "Subway #892"),
//!     BusinessRecord::new("3", "blue door bakery"),
//! ];
//!
//! let clusters = cluster_businesses(&records);
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].canonical_name, "subway");
//! assert_eq!(clusters[0].total_locations(), 2);
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use chainscope_resolver::{ChainResolver, PatternConfig, ResolverConfig};
//!
//! // Default: the tuned weights and thresholds
//! let resolver = ChainResolver::default();
//!
//! // Strict: fewer false positives
//! let strict = ChainResolver::new(ResolverConfig::strict(), &PatternConfig::default()).unwrap();
//!
//! // Lenient: fewer missed chains
//! let lenient = ChainResolver::new(ResolverConfig::lenient(), &PatternConfig::default()).unwrap();
//! ```
//!
//! # Configuration
//!
//! Both the weights and the pattern tables load from TOML:
//!
//! ```toml
//! known_chain_weight = 0.4
//! franchise_indicator_weight = 0.2
//! similar_name_weight = 0.15
//! shared_phone_weight = 0.1
//! shared_domain_weight = 0.25
//! proximity_weight = 0.1
//! name_similarity_threshold = 0.75
//! chain_confidence_threshold = 0.5
//! min_matches_for_chain = 2
//! phone_prefix_len = 7
//! proximity_radius_miles = 50.0
//! strategy = "sweep"
//! parallel_threshold = 512
//! ```
//!
//! # Clustering Strategies
//!
//! - `sweep` (default): one left-to-right pass; each chain record joins the
//!   cluster of its own canonical name.
//! - `connected`: chain records are unioned with everything they matched and
//!   each connected component becomes a cluster, independent of input order.

#![warn(missing_docs)]

mod clustering;
mod config;
mod error;
mod metrics;
mod resolver;
mod union_find;

pub mod canonical;
pub mod evidence;
pub mod index;
pub mod patterns;
pub mod signals;
pub mod similarity;

pub use config::{ClusterStrategy, ResolverConfig};
pub use error::ResolverError;
pub use evidence::{MatchEvidence, SignalKind};
pub use metrics::ClusteringMetrics;
pub use patterns::{ChainPatterns, PatternConfig};
pub use resolver::ChainResolver;
pub use union_find::UnionFind;

use chainscope_domain::{BusinessRecord, ChainCluster, ChainDetectionResult};
use std::sync::LazyLock;

static DEFAULT_RESOLVER: LazyLock<ChainResolver> = LazyLock::new(ChainResolver::default);

/// Resolve one record against a pool with the default configuration
pub fn detect_chain(subject: &BusinessRecord, pool: &[BusinessRecord]) -> ChainDetectionResult {
    DEFAULT_RESOLVER.detect_chain(subject, pool)
}

/// Cluster a record set with the default configuration
pub fn cluster_businesses(records: &[BusinessRecord]) -> Vec<ChainCluster> {
    DEFAULT_RESOLVER.cluster_businesses(records)
}
