//! Evidence gathered while resolving one record

use std::fmt;

/// The signal that produced a piece of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    /// Name matched a known brand pattern
    KnownChain,
    /// Name carries franchise indicators
    FranchiseIndicator,
    /// A pool record has a similar name
    SimilarName,
    /// Pool records share the phone prefix
    SharedPhone,
    /// Pool records share the website domain
    SharedDomain,
    /// Matched records lie within the proximity radius
    Proximity,
}

impl SignalKind {
    /// Every signal, in evaluation order
    pub const ALL: [SignalKind; 6] = [
        SignalKind::KnownChain,
        SignalKind::FranchiseIndicator,
        SignalKind::SimilarName,
        SignalKind::SharedPhone,
        SignalKind::SharedDomain,
        SignalKind::Proximity,
    ];

    /// Get the signal name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::KnownChain => "known_chain",
            SignalKind::FranchiseIndicator => "franchise_indicator",
            SignalKind::SimilarName => "similar_name",
            SignalKind::SharedPhone => "shared_phone",
            SignalKind::SharedDomain => "shared_domain",
            SignalKind::Proximity => "proximity",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reason and the confidence it contributed
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEvidence {
    /// Signal that fired
    pub kind: SignalKind,
    /// Confidence added (before clamping)
    pub contribution: f64,
    /// Human-readable reason
    pub reason: String,
}

impl MatchEvidence {
    /// Create a piece of evidence
    pub fn new(kind: SignalKind, contribution: f64, reason: impl Into<String>) -> Self {
        Self {
            kind,
            contribution,
            reason: reason.into(),
        }
    }
}
