//! Cluster command implementation.

use crate::cli::ClusterArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::source::{JsonClusterFile, JsonRecordFile};
use chainscope_domain::traits::{ClusterSink, RecordSource};
use chainscope_domain::{BusinessRecord, ChainCluster};
use chainscope_gatekeeper::Gatekeeper;
use chainscope_resolver::ClusteringMetrics;
use tracing::{info, warn};

/// Execute the cluster command.
pub fn execute_cluster(args: ClusterArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = JsonRecordFile::new(&args.file).load_records()?;
    let (clusters, metrics) = cluster_records(&records, &args, config)?;

    println!("{}", formatter.format_clusters(&clusters)?);

    if let Some(path) = &args.output {
        JsonClusterFile::new(path).store_clusters(&clusters)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Wrote {} cluster(s) to {}", clusters.len(), path.display()))
        );
    }

    if args.metrics {
        eprintln!("{}", metrics.summary());
    }

    Ok(())
}

/// Filter records through the gatekeeper and cluster the survivors.
fn cluster_records(
    records: &[BusinessRecord],
    args: &ClusterArgs,
    config: &Config,
) -> Result<(Vec<ChainCluster>, ClusteringMetrics)> {
    let gatekeeper = Gatekeeper::new(config.gatekeeper.clone());
    let batch = gatekeeper.validate_batch(records);
    for (record, result) in &batch.rejected {
        let reasons = result
            .reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(id = %record.id, reasons = %reasons, "Skipping invalid record");
    }

    let mut config = config.clone();
    if let Some(strategy) = args.strategy {
        config.resolver.strategy = strategy.into();
    }
    let resolver = config.build_resolver()?;

    info!(
        accepted = batch.accepted.len(),
        rejected = batch.rejected.len(),
        "Records loaded"
    );
    Ok(resolver.cluster_with_metrics(&batch.accepted_records()))
}
