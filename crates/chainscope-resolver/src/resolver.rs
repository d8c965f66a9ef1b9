//! Chain resolver: combines signals into a verdict for one record

use crate::evidence::{MatchEvidence, SignalKind};
use crate::index::{CandidateIndex, PreparedRecord};
use crate::signals::haversine_miles;
use crate::{ChainPatterns, ClusterStrategy, ClusteringMetrics, PatternConfig, ResolverConfig, ResolverError};
use chainscope_domain::{BusinessRecord, ChainCluster, ChainDetectionResult, ClusterId, Confidence, Role};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Slack for comparing accumulated float weights against thresholds
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Everything one resolution produced
///
/// `matched` holds pool positions, so callers that indexed the pool can map
/// matches back to records.
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub result: ChainDetectionResult,
    pub matched: BTreeSet<usize>,
    pub evidence: Vec<MatchEvidence>,
    pub canonical: String,
}

/// Resolves business records into chains
///
/// Holds validated weights and compiled pattern tables; both are immutable, so
/// one resolver can be shared across threads.
///
/// # Examples
///
/// ```
/// use chainscope_domain::BusinessRecord;
/// use chainscope_resolver::ChainResolver;
///
/// let resolver = ChainResolver::default();
/// let pool = vec![
///     BusinessRecord::new("a", "McDonald's #100").with_phone("212-555-0001"),
///     BusinessRecord::new("b", "McDonald's #200").with_phone("212-555-0099"),
/// ];
///
/// let result = resolver.detect_chain(&pool[0], &pool);
/// assert!(result.is_chain);
/// assert_eq!(result.total_locations, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ChainResolver {
    config: ResolverConfig,
    patterns: ChainPatterns,
}

impl ChainResolver {
    /// Create a resolver from configuration and pattern tables
    ///
    /// # Errors
    ///
    /// Fails if the configuration is out of range or a pattern does not compile.
    pub fn new(config: ResolverConfig, patterns: &PatternConfig) -> Result<Self, ResolverError> {
        let patterns = ChainPatterns::compile(patterns)?;
        Self::with_patterns(config, patterns)
    }

    /// Create a resolver from configuration and already compiled patterns
    pub fn with_patterns(config: ResolverConfig, patterns: ChainPatterns) -> Result<Self, ResolverError> {
        config.validate()?;
        Ok(Self { config, patterns })
    }

    /// Get the configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Get the compiled pattern tables
    pub fn patterns(&self) -> &ChainPatterns {
        &self.patterns
    }

    /// Decide whether `subject` belongs to a chain, given a candidate pool
    ///
    /// The pool may or may not contain the subject; pool records with the
    /// subject's id are never compared with it.
    pub fn detect_chain(&self, subject: &BusinessRecord, pool: &[BusinessRecord]) -> ChainDetectionResult {
        let index = CandidateIndex::build(pool, &self.config);
        let prepared = PreparedRecord::new(subject, self.config.phone_prefix_len);
        self.evaluate(subject, &prepared, &index).result
    }

    /// Group a record set into chain clusters using the configured strategy
    pub fn cluster_businesses(&self, records: &[BusinessRecord]) -> Vec<ChainCluster> {
        self.cluster_with_metrics(records).0
    }

    /// Like [`cluster_businesses`](Self::cluster_businesses), also returning run metrics
    pub fn cluster_with_metrics(&self, records: &[BusinessRecord]) -> (Vec<ChainCluster>, ClusteringMetrics) {
        let start = Instant::now();
        info!(
            records = records.len(),
            strategy = self.config.strategy.as_str(),
            "Clustering started"
        );

        let index = CandidateIndex::build(records, &self.config);
        let mut metrics = ClusteringMetrics {
            strategy: self.config.strategy,
            parallel_scan: index.is_parallel(),
            ..ClusteringMetrics::default()
        };
        debug!(records = index.len(), parallel = index.is_parallel(), "Candidate index built");

        let clusters = if index.is_empty() {
            Vec::new()
        } else {
            match self.config.strategy {
                ClusterStrategy::Sweep => crate::clustering::sweep(self, &index, &mut metrics),
                ClusterStrategy::Connected => crate::clustering::connected(self, &index, &mut metrics),
            }
        };

        metrics.clusters_formed = clusters.len();
        metrics.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            records = records.len(),
            clusters = clusters.len(),
            elapsed_ms = metrics.elapsed_ms,
            "Clustering finished"
        );

        (clusters, metrics)
    }

    /// Run every signal for one subject against an indexed pool
    pub(crate) fn evaluate(
        &self,
        subject: &BusinessRecord,
        prepared: &PreparedRecord,
        index: &CandidateIndex<'_>,
    ) -> Resolution {
        let config = &self.config;
        let pool = index.pool();
        let mut evidence = Vec::new();
        let mut matched = BTreeSet::new();

        if let Some(brand) = self.patterns.known_chain(&subject.name) {
            evidence.push(MatchEvidence::new(
                SignalKind::KnownChain,
                config.known_chain_weight,
                format!("Matches known chain pattern: {}", brand),
            ));
        }

        let indicators = self.patterns.franchise_indicators(&subject.name);
        if !indicators.is_empty() {
            evidence.push(MatchEvidence::new(
                SignalKind::FranchiseIndicator,
                config.franchise_indicator_weight,
                format!("Franchise indicators: {}", indicators.join(", ")),
            ));
        }

        for (i, score) in index.similar_names(&subject.id, &prepared.key, config.name_similarity_threshold) {
            matched.insert(i);
            evidence.push(MatchEvidence::new(
                SignalKind::SimilarName,
                config.similar_name_weight,
                format!(
                    "Similar name to \"{}\" ({}% match)",
                    pool[i].name,
                    Confidence::new(score).percent()
                ),
            ));
        }

        if let Some(prefix) = &prepared.phone_prefix {
            let sharing = index.sharing_phone(&subject.id, prefix);
            if !sharing.is_empty() {
                evidence.push(MatchEvidence::new(
                    SignalKind::SharedPhone,
                    config.shared_phone_weight,
                    format!("Shares phone prefix {} with {} location(s)", prefix, sharing.len()),
                ));
                matched.extend(sharing);
            }
        }

        if let Some(domain) = &prepared.domain {
            let sharing = index.sharing_domain(&subject.id, domain);
            if !sharing.is_empty() {
                evidence.push(MatchEvidence::new(
                    SignalKind::SharedDomain,
                    config.shared_domain_weight,
                    format!("Shares website domain {} with {} location(s)", domain, sharing.len()),
                ));
                matched.extend(sharing);
            }
        }

        if let Some(origin) = subject.coordinates {
            let nearby = matched
                .iter()
                .filter_map(|&i| pool[i].coordinates)
                .filter(|&c| haversine_miles(origin, c) <= config.proximity_radius_miles)
                .count();
            if nearby > 0 {
                evidence.push(MatchEvidence::new(
                    SignalKind::Proximity,
                    config.proximity_weight,
                    format!(
                        "{} matched location(s) within {} miles",
                        nearby, config.proximity_radius_miles
                    ),
                ));
            }
        }

        let raw: f64 = evidence.iter().map(|e| e.contribution).sum();
        let confidence = Confidence::new(raw);
        let is_chain = confidence.meets(config.chain_confidence_threshold - THRESHOLD_EPSILON)
            || matched.len() >= config.min_matches_for_chain;

        let canonical = prepared.key.canonical.clone();
        let result = ChainDetectionResult {
            is_chain,
            confidence,
            cluster_id: is_chain.then(|| ClusterId::from_canonical_name(&canonical)),
            total_locations: if is_chain { matched.len() + 1 } else { 1 },
            role: if is_chain {
                self.patterns.chain_role(&subject.name)
            } else {
                Role::Independent
            },
            reasons: evidence.iter().map(|e| e.reason.clone()).collect(),
        };

        info!(
            record = %subject.id,
            is_chain,
            confidence = %confidence,
            "Chain detection complete"
        );
        debug!(
            record = %subject.id,
            matched = matched.len(),
            signals = ?evidence.iter().map(|e| e.kind.as_str()).collect::<Vec<_>>(),
            reasons = ?result.reasons,
            "Chain detection reasons"
        );

        Resolution {
            result,
            matched,
            evidence,
            canonical,
        }
    }
}

impl Default for ChainResolver {
    fn default() -> Self {
        Self {
            config: ResolverConfig::default(),
            patterns: ChainPatterns::builtin(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = BusinessRecord> {
        (
            "[0-9]{1,3}",
            prop::sample::select(vec![
                "Subway #1", "Subway of Miami", "Miami Subway", "Joe's Pizza - East",
                "joe's pizza", "Blue Door Bakery", "corner bakery", "Starbucks HQ",
            ]),
            prop::option::of("[0-9]{3}-555-[0-9]{4}"),
            prop::option::of(prop::sample::select(vec!["acme.com", "https://www.acme.com/x", "subway.com"])),
        )
            .prop_map(|(id, name, phone, website)| {
                let mut record = BusinessRecord::new(id, name);
                record.phone = phone;
                record.website = website.map(str::to_string);
                record
            })
    }

    proptest! {
        /// Property: confidence is always within [0, 1] and consistent with the verdict
        #[test]
        fn test_confidence_bounds(pool in prop::collection::vec(record_strategy(), 1..12)) {
            let resolver = ChainResolver::default();
            for subject in &pool {
                let result = resolver.detect_chain(subject, &pool);
                let value = result.confidence.value();
                prop_assert!((0.0..=1.0).contains(&value));
                prop_assert_eq!(result.cluster_id.is_some(), result.is_chain);
                prop_assert_eq!(result.role == Role::Independent, !result.is_chain);
                if !result.is_chain {
                    prop_assert_eq!(result.total_locations, 1);
                }
            }
        }
    }
}
