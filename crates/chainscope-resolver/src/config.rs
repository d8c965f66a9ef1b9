//! Configuration for chain resolution
//!
//! Every signal weight, decision threshold and length constant the resolver
//! uses. The defaults are the tuned values; changing them changes which
//! records are called chains.

use crate::ResolverError;
use serde::{Deserialize, Serialize};

/// How a batch run turns per-record verdicts into clusters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStrategy {
    /// Single left-to-right pass; each chain record joins the cluster of its
    /// own canonical name
    #[default]
    Sweep,

    /// Union every chain record with its matched set and materialize the
    /// connected components, independent of input order
    Connected,
}

impl ClusterStrategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStrategy::Sweep => "sweep",
            ClusterStrategy::Connected => "connected",
        }
    }
}

/// Configuration for the chain resolver
///
/// # Examples
///
/// ```
/// use chainscope_resolver::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert_eq!(config.known_chain_weight, 0.4);
/// assert_eq!(config.phone_prefix_len, 7);
///
/// let strict = ResolverConfig::strict();
/// assert!(strict.chain_confidence_threshold > config.chain_confidence_threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Added when the name matches a known brand pattern
    /// Default: 0.4
    pub known_chain_weight: f64,

    /// Added when franchise indicators appear in the name
    /// Default: 0.2
    pub franchise_indicator_weight: f64,

    /// Added per pool record with a similar name
    /// Default: 0.15
    pub similar_name_weight: f64,

    /// Added when other records share the phone prefix
    /// Default: 0.1
    pub shared_phone_weight: f64,

    /// Added when other records share the website domain
    /// Default: 0.25
    pub shared_domain_weight: f64,

    /// Added when a matched record lies within the proximity radius
    /// Default: 0.1
    pub proximity_weight: f64,

    /// Minimum name similarity for a pool record to count as a match
    /// Default: 0.75
    pub name_similarity_threshold: f64,

    /// Confidence at or above which a record is a chain
    /// Default: 0.5
    pub chain_confidence_threshold: f64,

    /// Matched-set size at or above which a record is a chain regardless of confidence
    /// Default: 2
    pub min_matches_for_chain: usize,

    /// Number of leading phone digits compared (area code + exchange)
    /// Default: 7
    pub phone_prefix_len: usize,

    /// Radius for the proximity signal, in miles
    /// Default: 50
    pub proximity_radius_miles: f64,

    /// Batch clustering strategy
    /// Default: sweep
    #[serde(default)]
    pub strategy: ClusterStrategy,

    /// Pool size at which the name scan fans out across threads
    /// Default: 512
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    512
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            known_chain_weight: 0.4,
            franchise_indicator_weight: 0.2,
            similar_name_weight: 0.15,
            shared_phone_weight: 0.1,
            shared_domain_weight: 0.25,
            proximity_weight: 0.1,
            name_similarity_threshold: 0.75,
            chain_confidence_threshold: 0.5,
            min_matches_for_chain: 2,
            phone_prefix_len: 7,
            proximity_radius_miles: 50.0,
            strategy: ClusterStrategy::Sweep,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl ResolverConfig {
    /// Strict configuration (fewer false positives)
    ///
    /// - Name similarity threshold: 0.85
    /// - Chain confidence threshold: 0.6
    /// - Matches for chain: 3
    /// - Proximity radius: 25 miles
    pub fn strict() -> Self {
        Self {
            name_similarity_threshold: 0.85,
            chain_confidence_threshold: 0.6,
            min_matches_for_chain: 3,
            proximity_radius_miles: 25.0,
            ..Self::default()
        }
    }

    /// Lenient configuration (fewer missed chains)
    ///
    /// - Name similarity threshold: 0.7
    /// - Chain confidence threshold: 0.4
    /// - Proximity radius: 100 miles
    pub fn lenient() -> Self {
        Self {
            name_similarity_threshold: 0.7,
            chain_confidence_threshold: 0.4,
            proximity_radius_miles: 100.0,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ResolverError> {
        let unit_fields = [
            ("known_chain_weight", self.known_chain_weight),
            ("franchise_indicator_weight", self.franchise_indicator_weight),
            ("similar_name_weight", self.similar_name_weight),
            ("shared_phone_weight", self.shared_phone_weight),
            ("shared_domain_weight", self.shared_domain_weight),
            ("proximity_weight", self.proximity_weight),
            ("name_similarity_threshold", self.name_similarity_threshold),
            ("chain_confidence_threshold", self.chain_confidence_threshold),
        ];

        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ResolverError::Config(format!(
                    "{} must be in [0.0, 1.0], got {}",
                    name, value
                )));
            }
        }

        if self.phone_prefix_len == 0 {
            return Err(ResolverError::Config(
                "phone_prefix_len must be greater than 0".to_string(),
            ));
        }

        if !self.proximity_radius_miles.is_finite() || self.proximity_radius_miles <= 0.0 {
            return Err(ResolverError::Config(format!(
                "proximity_radius_miles must be a positive number, got {}",
                self.proximity_radius_miles
            )));
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ResolverError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ResolverError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ResolverError> {
        toml::to_string_pretty(self)
            .map_err(|e| ResolverError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
