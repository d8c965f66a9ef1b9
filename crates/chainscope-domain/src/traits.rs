//! Trait definitions for external collaborators
//!
//! The resolver never performs I/O. These traits describe the two sides it
//! sits between: whatever produces raw records (scrapers, importers) and
//! whatever persists the clusters. Implementations live outside the engine.

use crate::{BusinessRecord, ChainCluster};

/// Trait for loading business records
///
/// Implemented by ingestion adapters (e.g. the CLI's JSON file reader)
pub trait RecordSource {
    /// Error type for load operations
    type Error;

    /// Load the full record snapshot
    fn load_records(&self) -> Result<Vec<BusinessRecord>, Self::Error>;
}

/// Trait for persisting clusters
///
/// Implemented by the persistence layer
pub trait ClusterSink {
    /// Error type for store operations
    type Error;

    /// Store a batch of clusters
    fn store_clusters(&mut self, clusters: &[ChainCluster]) -> Result<(), Self::Error>;
}
