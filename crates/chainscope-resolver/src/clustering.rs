//! Batch clustering strategies
//!
//! `sweep` walks the records once, left to right, and files every chain
//! location under the cluster of its own canonical name. `connected` unions
//! each chain location with everything it matched and emits the connected
//! components, so membership no longer depends on input order.

use crate::index::{CandidateIndex, PreparedRecord};
use crate::resolver::{ChainResolver, Resolution};
use crate::union_find::UnionFind;
use crate::ClusteringMetrics;
use chainscope_domain::{BusinessRecord, ChainCluster, ClusterId, ClusterMember, RecordId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Single left-to-right pass
pub(crate) fn sweep(
    resolver: &ChainResolver,
    index: &CandidateIndex<'_>,
    metrics: &mut ClusteringMetrics,
) -> Vec<ChainCluster> {
    let mut processed: HashSet<&RecordId> = HashSet::new();
    let mut builder = ClusterSet::default();

    for (i, record) in index.pool().iter().enumerate() {
        if processed.contains(&record.id) {
            debug!(record = %record.id, "Skipping already processed record");
            metrics.record_duplicate();
            continue;
        }

        let prepared = index.prepared(i);
        let resolution = resolver.evaluate(record, prepared, index);
        metrics.record_resolution(
            resolution.result.is_chain,
            resolution.evidence.iter().map(|e| e.kind),
        );

        if !resolution.result.is_chain {
            continue;
        }

        let cluster = builder.cluster_for(&resolution);
        cluster.push_member(ClusterMember {
            id: record.id.clone(),
            name: record.name.clone(),
            role: resolution.result.role,
            reasons: resolution.result.reasons,
        });
        absorb_metadata(cluster, record, prepared);
        processed.insert(&record.id);
    }

    builder.finish()
}

/// Connected components of the match graph
pub(crate) fn connected(
    resolver: &ChainResolver,
    index: &CandidateIndex<'_>,
    metrics: &mut ClusteringMetrics,
) -> Vec<ChainCluster> {
    let pool = index.pool();

    // Later records sharing an id collapse onto the first one
    let mut first_seen: HashMap<&RecordId, usize> = HashMap::new();
    let mut canonical_pos = Vec::with_capacity(pool.len());
    for (i, record) in pool.iter().enumerate() {
        canonical_pos.push(*first_seen.entry(&record.id).or_insert(i));
    }

    let mut resolutions: Vec<Option<Resolution>> = Vec::with_capacity(pool.len());
    for (i, record) in pool.iter().enumerate() {
        if canonical_pos[i] != i {
            metrics.record_duplicate();
            resolutions.push(None);
            continue;
        }
        let resolution = resolver.evaluate(record, index.prepared(i), index);
        metrics.record_resolution(
            resolution.result.is_chain,
            resolution.evidence.iter().map(|e| e.kind),
        );
        resolutions.push(Some(resolution));
    }

    let mut components = UnionFind::new(pool.len());
    for (i, resolution) in resolutions.iter().enumerate() {
        if let Some(resolution) = resolution.as_ref().filter(|r| r.result.is_chain) {
            for &j in &resolution.matched {
                components.union(i, canonical_pos[j]);
            }
        }
    }

    // Members per component, in input order; the founder is the first chain location
    let mut component_order: Vec<usize> = Vec::new();
    let mut members_by_root: HashMap<usize, Vec<usize>> = HashMap::new();
    for i in (0..pool.len()).filter(|&i| resolutions[i].is_some()) {
        let root = components.find(i);
        members_by_root
            .entry(root)
            .or_insert_with(|| {
                component_order.push(root);
                Vec::new()
            })
            .push(i);
    }

    // Components whose founders share a canonical name form one cluster
    let mut cluster_order: Vec<ClusterId> = Vec::new();
    let mut members_by_cluster: HashMap<ClusterId, Vec<usize>> = HashMap::new();
    for root in component_order {
        let members = members_by_root.remove(&root).unwrap_or_default();
        let founder = members
            .iter()
            .find_map(|&i| resolutions[i].as_ref().and_then(|r| r.result.cluster_id));
        if let Some(cluster_id) = founder {
            members_by_cluster
                .entry(cluster_id)
                .or_insert_with(|| {
                    cluster_order.push(cluster_id);
                    Vec::new()
                })
                .extend(members);
        }
    }

    let mut builder = ClusterSet::default();
    for cluster_id in cluster_order {
        let mut members = members_by_cluster.remove(&cluster_id).unwrap_or_default();
        members.sort_unstable();

        let Some(founder) = members.iter().copied().find(|&i| {
            resolutions[i].as_ref().is_some_and(|r| r.result.is_chain)
        }) else {
            continue;
        };
        let founder_name = pool[founder].name.clone();
        if let Some(resolution) = resolutions[founder].as_ref() {
            builder.cluster_for(resolution);
        }

        for i in members {
            let Some(resolution) = resolutions[i].take() else {
                continue;
            };
            let record = &pool[i];
            let (role, reasons) = if resolution.result.is_chain {
                (resolution.result.role, resolution.result.reasons)
            } else {
                let mut reasons = resolution.result.reasons;
                reasons.push(format!("Connected to chain cluster via {}", founder_name));
                (resolver.patterns().chain_role(&record.name), reasons)
            };

            let cluster = builder.get_mut(cluster_id);
            if let Some(cluster) = cluster {
                cluster.push_member(ClusterMember {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    role,
                    reasons,
                });
                absorb_metadata(cluster, record, index.prepared(i));
            }
        }
    }

    debug!(clusters = builder.len(), "Connected components materialized");
    builder.finish()
}

/// Clusters keyed by id, in creation order
#[derive(Default)]
struct ClusterSet {
    clusters: Vec<ChainCluster>,
    positions: HashMap<ClusterId, usize>,
}

impl ClusterSet {
    /// Fetch the cluster for a chain resolution, creating it from this
    /// resolution's canonical name and confidence if new
    fn cluster_for(&mut self, resolution: &Resolution) -> &mut ChainCluster {
        let cluster_id = ClusterId::from_canonical_name(&resolution.canonical);
        let pos = match self.positions.get(&cluster_id) {
            Some(&pos) => pos,
            None => {
                self.clusters.push(ChainCluster::new(
                    resolution.canonical.clone(),
                    resolution.result.confidence,
                ));
                self.positions.insert(cluster_id, self.clusters.len() - 1);
                self.clusters.len() - 1
            }
        };
        &mut self.clusters[pos]
    }

    fn get_mut(&mut self, cluster_id: ClusterId) -> Option<&mut ChainCluster> {
        let pos = *self.positions.get(&cluster_id)?;
        self.clusters.get_mut(pos)
    }

    fn len(&self) -> usize {
        self.clusters.len()
    }

    fn finish(self) -> Vec<ChainCluster> {
        self.clusters
    }
}

fn absorb_metadata(cluster: &mut ChainCluster, record: &BusinessRecord, prepared: &PreparedRecord) {
    if let Some(city) = record.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        cluster.metadata.add_city(city);
    }
    if let Some(prefix) = &prepared.phone_prefix {
        cluster.metadata.add_phone_prefix(prefix);
    }
    if let Some(domain) = &prepared.domain {
        cluster.metadata.set_domain_if_unset(domain);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChainResolver, ClusterStrategy, PatternConfig, ResolverConfig};
    use chainscope_domain::{BusinessRecord, ClusterId, Role};

    fn connected_resolver() -> ChainResolver {
        let config = ResolverConfig {
            strategy: ClusterStrategy::Connected,
            ..ResolverConfig::default()
        };
        ChainResolver::new(config, &PatternConfig::default()).unwrap()
    }

    #[test]
    fn test_sweep_groups_by_canonical_name() {
        let records = vec![
            BusinessRecord::new("1", "Subway #4521").with_city("Miami").with_phone("305-555-1000"),
            BusinessRecord::new("2", "blue door bakery"),
            BusinessRecord::new("3", "Subway #892").with_city("Tampa").with_phone("813-555-2000"),
            BusinessRecord::new("4", "Subway of Miami").with_city("Miami").with_website("www.subway.com"),
        ];
        let clusters = ChainResolver::default().cluster_businesses(&records);

        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.canonical_name, "subway");
        assert_eq!(cluster.cluster_id, ClusterId::from_canonical_name("subway"));
        assert_eq!(cluster.total_locations(), 3);
        let ids: Vec<&str> = cluster.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        assert_eq!(cluster.metadata.cities, vec!["Miami", "Tampa"]);
        assert_eq!(cluster.metadata.phone_prefixes, vec!["3055551", "8135552"]);
        assert_eq!(cluster.metadata.domain.as_deref(), Some("subway.com"));
    }

    #[test]
    fn test_sweep_skips_duplicate_ids() {
        let records = vec![
            BusinessRecord::new("1", "Subway #1"),
            BusinessRecord::new("1", "Subway #1"),
            BusinessRecord::new("2", "Subway #2"),
        ];
        let (clusters, metrics) = ChainResolver::default().cluster_with_metrics(&records);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].total_locations(), 2);
        assert_eq!(metrics.duplicates_skipped, 1);
        assert_eq!(metrics.records_processed, 2);
    }

    #[test]
    fn test_sweep_founder_sets_confidence() {
        let records = vec![
            BusinessRecord::new("1", "Subway #1").with_phone("305-555-0001"),
            BusinessRecord::new("2", "Subway #2"),
        ];
        let resolver = ChainResolver::default();
        let founder = resolver.detect_chain(&records[0], &records);
        let clusters = resolver.cluster_businesses(&records);
        assert_eq!(clusters[0].confidence, founder.confidence);
    }

    #[test]
    fn test_connected_pulls_in_transitive_matches() {
        // Only record 1 is a chain; 2 and 3 each match it once and are
        // independent on their own
        let records = vec![
            BusinessRecord::new("1", "acme tools").with_website("acme.com"),
            BusinessRecord::new("2", "acme tools"),
            BusinessRecord::new("3", "plumbing supply depot").with_website("https://acme.com/depot"),
        ];

        let sweep = ChainResolver::default().cluster_businesses(&records);
        let sweep_ids: Vec<&str> = sweep.iter().flat_map(|c| c.members.iter().map(|m| m.id.as_str())).collect();
        assert!(!sweep_ids.contains(&"3"));

        let clusters = connected_resolver().cluster_businesses(&records);
        assert_eq!(clusters.len(), 1);
        let ids: Vec<&str> = clusters[0].members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let pulled = &clusters[0].members[2];
        assert_eq!(pulled.role, Role::Branch);
        assert_eq!(
            pulled.reasons.last().map(String::as_str),
            Some("Connected to chain cluster via acme tools")
        );
    }

    #[test]
    fn test_connected_membership_ignores_order() {
        let records = vec![
            BusinessRecord::new("1", "acme tools").with_website("acme.com"),
            BusinessRecord::new("2", "acme tools"),
            BusinessRecord::new("3", "plumbing supply depot").with_website("acme.com"),
            BusinessRecord::new("4", "blue door bakery"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let resolver = connected_resolver();
        let mut forward: Vec<String> = resolver.cluster_businesses(&records)
            .iter()
            .flat_map(|c| c.members.iter().map(|m| m.id.to_string()))
            .collect();
        let mut backward: Vec<String> = resolver.cluster_businesses(&reversed)
            .iter()
            .flat_map(|c| c.members.iter().map(|m| m.id.to_string()))
            .collect();
        forward.sort();
        backward.sort();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_connected_independents_form_no_cluster() {
        let records = vec![
            BusinessRecord::new("1", "blue door bakery"),
            BusinessRecord::new("2", "smith hardware"),
        ];
        assert!(connected_resolver().cluster_businesses(&records).is_empty());
    }
}
