//! Candidate index over a record pool
//!
//! Names, phone prefixes and domains are derived once per pool instead of once
//! per comparison. Phone and domain matches become bucket lookups; the name
//! scan keeps its full pairwise semantics but skips pairs whose length gap
//! already rules out a match, and fans out across rayon's pool for large pools.

use crate::signals::{extract_domain, phone_prefix};
use crate::similarity::NameKey;
use crate::ResolverConfig;
use chainscope_domain::{BusinessRecord, RecordId};
use rayon::prelude::*;
use std::collections::HashMap;

/// Comparison forms derived from one record
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRecord {
    /// Normalized and canonical name
    pub key: NameKey,
    /// Leading phone digits, if the phone has enough of them
    pub phone_prefix: Option<String>,
    /// Website host without `www.`
    pub domain: Option<String>,
}

impl PreparedRecord {
    /// Derive the comparison forms of a record
    pub fn new(record: &BusinessRecord, phone_prefix_len: usize) -> Self {
        Self {
            key: NameKey::new(&record.name),
            phone_prefix: record
                .phone
                .as_deref()
                .and_then(|p| phone_prefix(p, phone_prefix_len)),
            domain: record.website.as_deref().and_then(extract_domain),
        }
    }
}

/// A record pool with precomputed comparison forms and blocking buckets
#[derive(Debug)]
pub struct CandidateIndex<'a> {
    pool: &'a [BusinessRecord],
    prepared: Vec<PreparedRecord>,
    by_phone: HashMap<String, Vec<usize>>,
    by_domain: HashMap<String, Vec<usize>>,
    parallel: bool,
}

impl<'a> CandidateIndex<'a> {
    /// Index a pool
    pub fn build(pool: &'a [BusinessRecord], config: &ResolverConfig) -> Self {
        let parallel = pool.len() >= config.parallel_threshold;
        let prefix_len = config.phone_prefix_len;

        let prepared: Vec<PreparedRecord> = if parallel {
            pool.par_iter()
                .map(|r| PreparedRecord::new(r, prefix_len))
                .collect()
        } else {
            pool.iter()
                .map(|r| PreparedRecord::new(r, prefix_len))
                .collect()
        };

        let mut by_phone: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_domain: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, p) in prepared.iter().enumerate() {
            if let Some(prefix) = &p.phone_prefix {
                by_phone.entry(prefix.clone()).or_default().push(i);
            }
            if let Some(domain) = &p.domain {
                by_domain.entry(domain.clone()).or_default().push(i);
            }
        }

        Self {
            pool,
            prepared,
            by_phone,
            by_domain,
            parallel,
        }
    }

    /// The indexed records
    pub fn pool(&self) -> &'a [BusinessRecord] {
        self.pool
    }

    /// Comparison forms of the record at `i`
    pub fn prepared(&self, i: usize) -> &PreparedRecord {
        &self.prepared[i]
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// True when the pool is empty
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Whether name scans run in parallel
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Pool records (other than `subject_id`) whose name similarity to `key`
    /// reaches `threshold`, as `(index, score)` in pool order
    pub fn similar_names(
        &self,
        subject_id: &RecordId,
        key: &NameKey,
        threshold: f64,
    ) -> Vec<(usize, f64)> {
        if self.parallel {
            self.pool
                .par_iter()
                .zip(self.prepared.par_iter())
                .enumerate()
                .filter_map(|(i, (record, prepared))| {
                    score_candidate(subject_id, key, threshold, i, record, prepared)
                })
                .collect()
        } else {
            self.pool
                .iter()
                .zip(self.prepared.iter())
                .enumerate()
                .filter_map(|(i, (record, prepared))| {
                    score_candidate(subject_id, key, threshold, i, record, prepared)
                })
                .collect()
        }
    }

    /// Pool records (other than `subject_id`) with the given phone prefix
    pub fn sharing_phone(&self, subject_id: &RecordId, prefix: &str) -> Vec<usize> {
        self.bucket(&self.by_phone, subject_id, prefix)
    }

    /// Pool records (other than `subject_id`) with the given website domain
    pub fn sharing_domain(&self, subject_id: &RecordId, domain: &str) -> Vec<usize> {
        self.bucket(&self.by_domain, subject_id, domain)
    }

    fn bucket(
        &self,
        buckets: &HashMap<String, Vec<usize>>,
        subject_id: &RecordId,
        key: &str,
    ) -> Vec<usize> {
        buckets
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|&i| &self.pool[i].id != subject_id)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn score_candidate(
    subject_id: &RecordId,
    key: &NameKey,
    threshold: f64,
    i: usize,
    record: &BusinessRecord,
    prepared: &PreparedRecord,
) -> Option<(usize, f64)> {
    if &record.id == subject_id {
        return None;
    }
    key.similarity_at_least(&prepared.key, threshold)
        .map(|score| (i, score))
}
