//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Chainscope CLI - Group business records into chain and franchise clusters.
#[derive(Debug, Parser)]
#[command(name = "chainscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CHAINSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cluster a file of business records into chains
    Cluster(ClusterArgs),

    /// Decide whether one record belongs to a chain
    Detect(DetectArgs),

    /// Check a record file against the ingestion rules
    Validate(ValidateArgs),

    /// Show normalized and canonical forms of names
    Canonicalize(CanonicalizeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the cluster command.
#[derive(Debug, Parser)]
pub struct ClusterArgs {
    /// JSON file containing business records (`-` for stdin)
    pub file: PathBuf,

    /// Clustering strategy (overrides the config file)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Write clusters as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a metrics summary after clustering
    #[arg(short, long)]
    pub metrics: bool,
}

/// Arguments for the detect command.
#[derive(Debug, Parser)]
pub struct DetectArgs {
    /// JSON file containing the comparison pool (`-` for stdin)
    pub file: PathBuf,

    /// Id of a record in the pool to use as the subject
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    pub id: Option<String>,

    /// Name of an ad-hoc subject record
    #[arg(long)]
    pub name: Option<String>,

    /// Phone of the ad-hoc subject
    #[arg(long, requires = "name")]
    pub phone: Option<String>,

    /// Website of the ad-hoc subject
    #[arg(long, requires = "name")]
    pub website: Option<String>,

    /// City of the ad-hoc subject
    #[arg(long, requires = "name")]
    pub city: Option<String>,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// JSON file containing business records (`-` for stdin)
    pub file: PathBuf,

    /// Use the strict rule set instead of the configured one
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the canonicalize command.
#[derive(Debug, Parser)]
pub struct CanonicalizeArgs {
    /// Business names
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Resolver preset to write
        #[arg(short, long, value_enum, default_value = "default")]
        preset: PresetArg,
    },

    /// Print the configuration file path
    Path,
}

/// Clustering strategy argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// Single ordered pass keyed by canonical name
    Sweep,
    /// Connected components over matched sets
    Connected,
}

/// Resolver preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Tuned defaults
    Default,
    /// Fewer, surer chains
    Strict,
    /// More aggressive grouping
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<StrategyArg> for chainscope_resolver::ClusterStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Sweep => chainscope_resolver::ClusterStrategy::Sweep,
            StrategyArg::Connected => chainscope_resolver::ClusterStrategy::Connected,
        }
    }
}

impl From<PresetArg> for chainscope_resolver::ResolverConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => chainscope_resolver::ResolverConfig::default(),
            PresetArg::Strict => chainscope_resolver::ResolverConfig::strict(),
            PresetArg::Lenient => chainscope_resolver::ResolverConfig::lenient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_resolver::ClusterStrategy;

    #[test]
    fn test_cluster_command() {
        let cli = Cli::parse_from(["chainscope", "cluster", "records.json", "--strategy", "connected", "-m"]);
        match cli.command {
            Command::Cluster(args) => {
                assert_eq!(args.file, PathBuf::from("records.json"));
                assert!(matches!(args.strategy, Some(StrategyArg::Connected)));
                assert!(args.metrics);
                assert!(args.output.is_none());
            }
            _ => panic!("Expected Cluster command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chainscope", "canonicalize", "Subway #1", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_detect_requires_id_or_name() {
        assert!(Cli::try_parse_from(["chainscope", "detect", "records.json"]).is_err());
        assert!(Cli::try_parse_from(["chainscope", "detect", "records.json", "--id", "1", "--name", "x"]).is_err());
        assert!(Cli::try_parse_from(["chainscope", "detect", "records.json", "--id", "1", "--phone", "555"]).is_err());

        let cli = Cli::parse_from(["chainscope", "detect", "records.json", "--name", "Subway", "--city", "Miami"]);
        match cli.command {
            Command::Detect(args) => {
                assert_eq!(args.name.as_deref(), Some("Subway"));
                assert_eq!(args.city.as_deref(), Some("Miami"));
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_canonicalize_requires_names() {
        assert!(Cli::try_parse_from(["chainscope", "canonicalize"]).is_err());
    }

    #[test]
    fn test_config_init_preset() {
        let cli = Cli::parse_from(["chainscope", "config", "init", "--preset", "strict", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force, preset },
            }) => {
                assert!(force);
                assert!(matches!(preset, PresetArg::Strict));
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_strategy_conversion() {
        let strategy: ClusterStrategy = StrategyArg::Connected.into();
        assert_eq!(strategy, ClusterStrategy::Connected);
    }
}
