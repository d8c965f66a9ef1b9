//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chainscope_domain::{BusinessRecord, ChainCluster, ChainDetectionResult};
use chainscope_gatekeeper::BatchValidation;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// Name forms shown by the canonicalize command.
#[derive(Debug, Clone, PartialEq)]
pub struct NameForms {
    /// Name as given
    pub original: String,
    /// Normalized name
    pub normalized: String,
    /// Canonical name
    pub canonical: String,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format clusters output.
    pub fn format_clusters(&self, clusters: &[ChainCluster]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = clusters.iter().map(cluster_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_clusters_table(clusters)),
            OutputFormat::Quiet => Ok(clusters
                .iter()
                .map(|c| c.cluster_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_clusters_table(&self, clusters: &[ChainCluster]) -> String {
        if clusters.is_empty() {
            return self.colorize("No chains found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Cluster", "Canonical Name", "Confidence", "Locations", "Members", "Cities", "Domain"]);

        for cluster in clusters {
            let members = cluster
                .members
                .iter()
                .map(|m| format!("{} ({})", m.name, m.role))
                .collect::<Vec<_>>()
                .join("\n");
            builder.push_record([
                &cluster.cluster_id.to_string()[..8], // Truncate ID for readability
                &cluster.canonical_name,
                &cluster.confidence.to_string(),
                &cluster.total_locations().to_string(),
                &members,
                &cluster.metadata.cities.join(", "),
                cluster.metadata.domain.as_deref().unwrap_or("-"),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a single-record detection result.
    pub fn format_detection(&self, subject: &BusinessRecord, result: &ChainDetectionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&detection_json(subject, result))?),
            OutputFormat::Quiet => Ok(result
                .cluster_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "independent".to_string())),
            OutputFormat::Table => {
                let verdict = if result.is_chain {
                    self.colorize("chain", "green")
                } else {
                    self.colorize("independent", "yellow")
                };
                let cluster = result
                    .cluster_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());

                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Record", &format!("{} ({})", subject.name, subject.id)]);
                builder.push_record(["Verdict", &verdict]);
                builder.push_record(["Confidence", &result.confidence.to_string()]);
                builder.push_record(["Role", result.role.as_str()]);
                builder.push_record(["Locations", &result.total_locations.to_string()]);
                builder.push_record(["Cluster", &cluster]);
                builder.push_record(["Reasons", &result.reasons.join("\n")]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a batch validation report.
    pub fn format_validation(&self, batch: &BatchValidation<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rejected: Vec<serde_json::Value> = batch
                    .rejected
                    .iter()
                    .map(|(record, result)| {
                        serde_json::json!({
                            "id": record.id.as_str(),
                            "name": record.name,
                            "quality_score": result.quality_score,
                            "reasons": result.reasons.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "accepted": batch.accepted.len(),
                    "rejected": rejected,
                }))?)
            }
            OutputFormat::Quiet => Ok(batch
                .rejected
                .iter()
                .map(|(record, _)| record.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let summary = format!(
                    "{} accepted, {} rejected",
                    batch.accepted.len(),
                    batch.rejected.len()
                );
                if batch.rejected.is_empty() {
                    return Ok(self.success(&summary));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Reasons"]);
                for (record, result) in &batch.rejected {
                    let reasons = result
                        .reasons
                        .iter()
                        .map(|r| r.to_string())
                        .collect::<Vec<_>>()
                        .join("\n");
                    builder.push_record([record.id.as_str(), &record.name, &reasons]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(format!("{}\n{}", table, self.warning(&summary)))
            }
        }
    }

    /// Format normalized and canonical forms of names.
    pub fn format_names(&self, names: &[NameForms]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = names
                    .iter()
                    .map(|n| {
                        serde_json::json!({
                            "name": n.original,
                            "normalized": n.normalized,
                            "canonical": n.canonical,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(names
                .iter()
                .map(|n| n.canonical.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Name", "Normalized", "Canonical"]);
                for n in names {
                    builder.push_record([&n.original, &n.normalized, &n.canonical]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON representation of a cluster.
pub fn cluster_json(cluster: &ChainCluster) -> serde_json::Value {
    serde_json::json!({
        "cluster_id": cluster.cluster_id.to_string(),
        "canonical_name": cluster.canonical_name,
        "confidence": cluster.confidence.value(),
        "total_locations": cluster.total_locations(),
        "members": cluster.members.iter().map(|m| serde_json::json!({
            "id": m.id.as_str(),
            "name": m.name,
            "role": m.role.as_str(),
            "reasons": m.reasons,
        })).collect::<Vec<_>>(),
        "metadata": {
            "phone_prefixes": cluster.metadata.phone_prefixes,
            "cities": cluster.metadata.cities,
            "domain": cluster.metadata.domain,
        }
    })
}

/// JSON representation of a detection result.
pub fn detection_json(subject: &BusinessRecord, result: &ChainDetectionResult) -> serde_json::Value {
    serde_json::json!({
        "id": subject.id.as_str(),
        "name": subject.name,
        "is_chain": result.is_chain,
        "confidence": result.confidence.value(),
        "cluster_id": result.cluster_id.map(|id| id.to_string()),
        "total_locations": result.total_locations,
        "role": result.role.as_str(),
        "reasons": result.reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_domain::{ClusterMember, Confidence, Role};
    use chainscope_gatekeeper::Gatekeeper;

    fn create_test_cluster() -> ChainCluster {
        let mut cluster = ChainCluster::new("subway", Confidence::new(0.75));
        cluster.push_member(ClusterMember {
            id: "1".into(),
            name: "Subway #4521".to_string(),
            role: Role::Franchise,
            reasons: vec!["Matches known chain pattern: Subway".to_string()],
        });
        cluster.metadata.add_city("Miami");
        cluster
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_clusters(&[create_test_cluster()]).unwrap();
        assert!(output.contains("canonical_name"));
        assert!(output.contains("\"franchise\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let cluster = create_test_cluster();
        let output = formatter.format_clusters(std::slice::from_ref(&cluster)).unwrap();
        assert_eq!(output, cluster.cluster_id.to_string());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_clusters(&[create_test_cluster()]).unwrap();
        assert!(output.contains("Canonical Name"));
        assert!(output.contains("Subway #4521 (franchise)"));
        assert!(output.contains("Miami"));
    }

    #[test]
    fn test_empty_clusters() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_clusters(&[]).unwrap();
        assert!(output.contains("No chains found"));
    }

    #[test]
    fn test_detection_quiet_independent() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let subject = BusinessRecord::new("1", "blue door bakery");
        let output = formatter
            .format_detection(&subject, &ChainDetectionResult::independent())
            .unwrap();
        assert_eq!(output, "independent");
    }

    #[test]
    fn test_detection_json() {
        let subject = BusinessRecord::new("1", "blue door bakery");
        let json = detection_json(&subject, &ChainDetectionResult::independent());
        assert_eq!(json["is_chain"], false);
        assert_eq!(json["role"], "independent");
        assert!(json["cluster_id"].is_null());
    }

    #[test]
    fn test_validation_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let records = vec![BusinessRecord::new("1", "Subway"), BusinessRecord::new("2", "")];
        let batch = Gatekeeper::default_config().validate_batch(&records);

        let output = formatter.format_validation(&batch).unwrap();
        assert!(output.contains("business name is empty"));
        assert!(output.contains("1 accepted, 1 rejected"));
    }

    #[test]
    fn test_names_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let names = vec![NameForms {
            original: "Subway #1".to_string(),
            normalized: "subway 1".to_string(),
            canonical: "subway".to_string(),
        }];
        assert_eq!(formatter.format_names(&names).unwrap(), "subway");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
