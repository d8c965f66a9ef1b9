//! Chainscope Domain Layer
//!
//! This crate holds the value types shared by every Chainscope crate: the
//! business records supplied by upstream collectors, and the detection results
//! and clusters the resolver hands back. Its only external dependency is `uuid`,
//! used to derive cluster identifiers deterministically from canonical names.
//!
//! ## Key Concepts
//!
//! - **BusinessRecord**: an immutable input record describing one business location
//! - **Confidence**: a score clamped to [0, 1]
//! - **Role**: how a record relates to its chain (headquarters, branch, franchise, independent)
//! - **ChainDetectionResult**: the verdict for a single record against a candidate pool
//! - **ChainCluster**: a group of records that resolve to the same chain
//!
//! ## Architecture
//!
//! - Pure data, no I/O
//! - Trait definitions for the collaborators that load records and persist clusters
//! - The matching engine lives in `chainscope-resolver`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod confidence;
pub mod detection;
pub mod record;
pub mod role;
pub mod traits;

// Re-exports for convenience
pub use cluster::{ChainCluster, ClusterId, ClusterMember, ClusterMetadata};
pub use confidence::Confidence;
pub use detection::ChainDetectionResult;
pub use record::{BusinessRecord, Coordinates, RecordId};
pub use role::Role;
