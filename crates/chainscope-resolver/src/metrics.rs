//! Metrics collected during a clustering run

use crate::evidence::SignalKind;
use crate::ClusterStrategy;
use std::collections::HashMap;

/// Metrics collected during a clustering run
///
/// Tracks verdict counts, how often each signal fired, and run time.
#[derive(Debug, Clone, Default)]
pub struct ClusteringMetrics {
    /// Records resolved against the pool
    pub records_processed: usize,

    /// Records resolved as chain locations
    pub chain_positive: usize,

    /// Records resolved as independent
    pub independent: usize,

    /// Records skipped because their id was already seen
    pub duplicates_skipped: usize,

    /// Clusters emitted
    pub clusters_formed: usize,

    /// Times each signal fired
    pub signal_hits: HashMap<SignalKind, usize>,

    /// Strategy the run used
    pub strategy: ClusterStrategy,

    /// Whether the name scan ran in parallel
    pub parallel_scan: bool,

    /// Total runtime in milliseconds
    pub elapsed_ms: u64,
}

impl ClusteringMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for one record and the signals behind it
    pub fn record_resolution(&mut self, is_chain: bool, signals: impl IntoIterator<Item = SignalKind>) {
        self.records_processed += 1;
        if is_chain {
            self.chain_positive += 1;
        } else {
            self.independent += 1;
        }
        for kind in signals {
            *self.signal_hits.entry(kind).or_insert(0) += 1;
        }
    }

    /// Record a skipped duplicate id
    pub fn record_duplicate(&mut self) {
        self.duplicates_skipped += 1;
    }

    /// Times a signal fired
    pub fn hits(&self, kind: SignalKind) -> usize {
        self.signal_hits.get(&kind).copied().unwrap_or(0)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Clustering Metrics Summary".to_string(),
            "==========================".to_string(),
            format!("Strategy: {}", self.strategy.as_str()),
            format!("Parallel scan: {}", if self.parallel_scan { "yes" } else { "no" }),
            format!("Records processed: {}", self.records_processed),
            format!("Chain locations: {}", self.chain_positive),
            format!("Independent: {}", self.independent),
            format!("Clusters formed: {}", self.clusters_formed),
            format!("Total runtime: {}ms", self.elapsed_ms),
        ];

        if self.duplicates_skipped > 0 {
            lines.push(format!("Duplicate ids skipped: {}", self.duplicates_skipped));
        }

        if !self.signal_hits.is_empty() {
            lines.push(String::new());
            lines.push("Signal hits:".to_string());
            for kind in SignalKind::ALL {
                let count = self.hits(kind);
                if count > 0 {
                    lines.push(format!("  {}: {}", kind, count));
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = ClusteringMetrics::new();
        assert_eq!(metrics.records_processed, 0);
        assert_eq!(metrics.clusters_formed, 0);
        assert_eq!(metrics.hits(SignalKind::KnownChain), 0);
    }

    #[test]
    fn test_record_resolution() {
        let mut metrics = ClusteringMetrics::new();
        metrics.record_resolution(true, [SignalKind::KnownChain, SignalKind::SimilarName, SignalKind::SimilarName]);
        metrics.record_resolution(false, Vec::new());
        metrics.record_resolution(true, [SignalKind::KnownChain]);

        assert_eq!(metrics.records_processed, 3);
        assert_eq!(metrics.chain_positive, 2);
        assert_eq!(metrics.independent, 1);
        assert_eq!(metrics.hits(SignalKind::KnownChain), 2);
        assert_eq!(metrics.hits(SignalKind::SimilarName), 2);
        assert_eq!(metrics.hits(SignalKind::Proximity), 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = ClusteringMetrics::new();
        metrics.record_resolution(true, [SignalKind::SharedPhone]);
        metrics.record_duplicate();
        metrics.clusters_formed = 1;
        metrics.elapsed_ms = 42;

        let summary = metrics.summary();
        assert!(summary.contains("Strategy: sweep"));
        assert!(summary.contains("Records processed: 1"));
        assert!(summary.contains("Clusters formed: 1"));
        assert!(summary.contains("Total runtime: 42ms"));
        assert!(summary.contains("Duplicate ids skipped: 1"));
        assert!(summary.contains("shared_phone: 1"));
        assert!(!summary.contains("proximity"));
    }
}
