//! End-to-end tests through the CLI library: record file in, cluster file out.

use chainscope_cli::cli::{ClusterArgs, StrategyArg};
use chainscope_cli::commands::execute_cluster;
use chainscope_cli::config::OutputFormat;
use chainscope_cli::{Config, Formatter};
use std::fs;
use tempfile::tempdir;

const RECORDS: &str = r#"[
    {"id": "s1", "name": "Subway #4521", "city": "Miami", "lat": 25.7617, "lng": -80.1918},
    {"id": "s2", "name": "Subway #1188", "city": "Miami", "lat": 25.7743, "lng": -80.1937},
    {"id": "a1", "name": "Acme Tools #1", "phone": "312-555-0101", "website": "https://www.acme.com/stores/1"},
    {"id": "a2", "name": "Acme Tools #2", "phone": "312-555-0199", "website": "http://acme.com/stores/2"},
    {"id": "b1", "name": "Blue Door Bakery", "phone": "503-555-1234"}
]"#;

fn run(strategy: StrategyArg) -> serde_json::Value {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    let output = dir.path().join("out").join("clusters.json");
    fs::write(&input, RECORDS).unwrap();

    let args = ClusterArgs {
        file: input,
        strategy: Some(strategy),
        output: Some(output.clone()),
        metrics: false,
    };
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    execute_cluster(args, &Config::default(), &formatter).unwrap();

    serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap()
}

fn member_ids(cluster: &serde_json::Value) -> Vec<String> {
    cluster["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_cluster_file_round_trip() {
    let clusters = run(StrategyArg::Sweep);
    let clusters = clusters.as_array().unwrap();

    let subway = clusters
        .iter()
        .find(|c| c["canonical_name"] == "subway")
        .expect("subway cluster");
    assert_eq!(member_ids(subway), vec!["s1", "s2"]);
    assert_eq!(subway["metadata"]["cities"][0], "Miami");

    let acme = clusters
        .iter()
        .find(|c| c["metadata"]["domain"] == "acme.com")
        .expect("acme cluster");
    assert_eq!(acme["total_locations"], 2);

    assert!(clusters.iter().all(|c| !member_ids(c).contains(&"b1".to_string())));
}

#[test]
fn test_strategies_agree_on_simple_input() {
    let sweep = run(StrategyArg::Sweep);
    let connected = run(StrategyArg::Connected);

    let mut sweep_sets: Vec<Vec<String>> = sweep.as_array().unwrap().iter().map(member_ids).collect();
    let mut connected_sets: Vec<Vec<String>> = connected.as_array().unwrap().iter().map(member_ids).collect();
    sweep_sets.sort();
    connected_sets.sort();
    assert_eq!(sweep_sets, connected_sets);
}
