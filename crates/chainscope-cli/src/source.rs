//! JSON file adapters for the record source and cluster sink traits.

use crate::error::{CliError, Result};
use crate::output::cluster_json;
use chainscope_domain::traits::{ClusterSink, RecordSource};
use chainscope_domain::{BusinessRecord, ChainCluster};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads business records from a JSON array file (`-` reads stdin).
#[derive(Debug, Clone)]
pub struct JsonRecordFile {
    path: PathBuf,
}

impl JsonRecordFile {
    /// Create a reader for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_contents(&self) -> Result<String> {
        if self.path == Path::new("-") {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            return Ok(buffer);
        }

        if !self.path.exists() {
            return Err(CliError::NotFound(format!(
                "Record file '{}' does not exist",
                self.path.display()
            )));
        }
        Ok(fs::read_to_string(&self.path)?)
    }
}

impl RecordSource for JsonRecordFile {
    type Error = CliError;

    fn load_records(&self) -> Result<Vec<BusinessRecord>> {
        parse_records(&self.read_contents()?)
    }
}

/// Parse a JSON array of record definitions.
pub fn parse_records(json: &str) -> Result<Vec<BusinessRecord>> {
    let definitions: Vec<RecordDefinition> = serde_json::from_str(json)?;
    definitions
        .into_iter()
        .enumerate()
        .map(|(i, def)| def.into_record(i))
        .collect()
}

/// Writes clusters to a JSON file.
#[derive(Debug, Clone)]
pub struct JsonClusterFile {
    path: PathBuf,
}

impl JsonClusterFile {
    /// Create a writer for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClusterSink for JsonClusterFile {
    type Error = CliError;

    fn store_clusters(&mut self, clusters: &[ChainCluster]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let document: Vec<serde_json::Value> = clusters.iter().map(cluster_json).collect();
        fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}

/// Record as it appears in input files.
#[derive(Debug, Deserialize)]
struct RecordDefinition {
    id: IdDefinition,
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    longitude: Option<f64>,
}

/// Ids may be strings or integers in input files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdDefinition {
    Text(String),
    Number(i64),
}

impl RecordDefinition {
    fn into_record(self, position: usize) -> Result<BusinessRecord> {
        let id = match self.id {
            IdDefinition::Text(text) => text,
            IdDefinition::Number(n) => n.to_string(),
        };

        let mut record = BusinessRecord::new(id, self.name);
        record.phone = non_blank(self.phone);
        record.address = non_blank(self.address);
        record.city = non_blank(self.city);
        record.state = non_blank(self.state);
        record.website = non_blank(self.website);

        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                record = record.with_coordinates(latitude, longitude);
            }
            (None, None) => {}
            _ => {
                return Err(CliError::InvalidInput(format!(
                    "Record {} ('{}') has only one of latitude/longitude",
                    position, record.id
                )));
            }
        }

        Ok(record)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
