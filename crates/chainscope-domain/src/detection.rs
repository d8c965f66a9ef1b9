//! Single-record detection result

use crate::{ClusterId, Confidence, Role};

/// Verdict for one record resolved against a candidate pool
#[derive(Debug, Clone, PartialEq)]
pub struct ChainDetectionResult {
    /// Whether the record belongs to a chain
    pub is_chain: bool,

    /// Aggregated confidence, in [0, 1]
    pub confidence: Confidence,

    /// Cluster the record belongs to (chains only)
    pub cluster_id: Option<ClusterId>,

    /// Number of locations including the subject (1 for independents)
    pub total_locations: usize,

    /// Assigned role
    pub role: Role,

    /// Human-readable match reasons, in evaluation order
    pub reasons: Vec<String>,
}

impl ChainDetectionResult {
    /// Result for a record with no chain evidence at all
    pub fn independent() -> Self {
        Self {
            is_chain: false,
            confidence: Confidence::ZERO,
            cluster_id: None,
            total_locations: 1,
            role: Role::Independent,
            reasons: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_result() {
        let result = ChainDetectionResult::independent();
        assert!(!result.is_chain);
        assert_eq!(result.total_locations, 1);
        assert_eq!(result.role, Role::Independent);
        assert!(result.cluster_id.is_none());
    }
}
