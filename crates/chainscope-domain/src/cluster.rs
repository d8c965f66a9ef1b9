//! Cluster module - groups of records resolved to the same chain

use crate::{Confidence, RecordId, Role};
use std::fmt;

/// Namespace for cluster identifiers
///
/// Fixed forever: changing it changes every cluster id ever emitted.
const CLUSTER_NAMESPACE: uuid::Uuid = uuid::Uuid::from_u128(0x6f1c_2a9e_83d4_5b07_a1e2_c4d9_0f37_b2e8);

/// Stable identifier of a chain cluster
///
/// A UUIDv5 over the canonical name, so two records whose names canonicalize
/// to the same text always land in the same cluster, across runs and machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(uuid::Uuid);

impl ClusterId {
    /// Derive the cluster id for a canonical name
    ///
    /// # Examples
    ///
    /// ```
    /// use chainscope_domain::ClusterId;
    ///
    /// let a = ClusterId::from_canonical_name("subway");
    /// let b = ClusterId::from_canonical_name("subway");
    /// assert_eq!(a, b);
    /// assert_ne!(a, ClusterId::from_canonical_name("starbucks"));
    /// ```
    pub fn from_canonical_name(canonical_name: &str) -> Self {
        Self(uuid::Uuid::new_v5(&CLUSTER_NAMESPACE, canonical_name.as_bytes()))
    }

    /// Parse a ClusterId from its hyphenated string form
    pub fn parse(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid cluster id: {}", e))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record's membership in a cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMember {
    /// Record identifier
    pub id: RecordId,

    /// Original (non-canonical) name
    pub name: String,

    /// Assigned role
    pub role: Role,

    /// Human-readable match reasons
    pub reasons: Vec<String>,
}

/// Facts accumulated across a cluster's members
///
/// Lists keep first-seen order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterMetadata {
    /// Distinct phone prefixes (area code + exchange)
    pub phone_prefixes: Vec<String>,

    /// Distinct cities
    pub cities: Vec<String>,

    /// Website domain, taken from the first member that has one
    pub domain: Option<String>,
}

impl ClusterMetadata {
    /// Record a phone prefix if not yet seen
    pub fn add_phone_prefix(&mut self, prefix: &str) {
        if !self.phone_prefixes.iter().any(|p| p == prefix) {
            self.phone_prefixes.push(prefix.to_string());
        }
    }

    /// Record a city if not yet seen
    pub fn add_city(&mut self, city: &str) {
        if !self.cities.iter().any(|c| c == city) {
            self.cities.push(city.to_string());
        }
    }

    /// Set the domain unless one is already set
    pub fn set_domain_if_unset(&mut self, domain: &str) {
        if self.domain.is_none() {
            self.domain = Some(domain.to_string());
        }
    }
}

/// A chain and the records that belong to it
#[derive(Debug, Clone, PartialEq)]
pub struct ChainCluster {
    /// Stable identifier derived from the canonical name
    pub cluster_id: ClusterId,

    /// Canonical brand name shared by the members
    pub canonical_name: String,

    /// Confidence of the founding record
    pub confidence: Confidence,

    /// Members in the order they joined
    pub members: Vec<ClusterMember>,

    /// Accumulated phone prefixes, cities and domain
    pub metadata: ClusterMetadata,
}

impl ChainCluster {
    /// Create an empty cluster for a canonical name
    pub fn new(canonical_name: impl Into<String>, confidence: Confidence) -> Self {
        let canonical_name = canonical_name.into();
        Self {
            cluster_id: ClusterId::from_canonical_name(&canonical_name),
            canonical_name,
            confidence,
            members: Vec::new(),
            metadata: ClusterMetadata::default(),
        }
    }

    /// Number of locations in the cluster
    ///
    /// Always equal to the member count.
    pub fn total_locations(&self) -> usize {
        self.members.len()
    }

    /// Check whether a record is a member
    pub fn contains(&self, id: &RecordId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    /// Append a member
    pub fn push_member(&mut self, member: ClusterMember) {
        self.members.push(member);
    }
}
