//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use chainscope_gatekeeper::ValidationConfig;
use chainscope_resolver::{ChainResolver, PatternConfig, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// A `[resolver]` section must list every weight; leave the section out to
/// use the defaults. `[patterns]` is optional and replaces the built-in
/// brand tables when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Resolver weights and thresholds
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Custom pattern tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternConfig>,

    /// Ingestion validation rules
    #[serde(default)]
    pub gatekeeper: ValidationConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".chainscope").join("config.toml"))
    }

    /// Load configuration from a file, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.resolver.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Build a resolver from the configured weights and patterns.
    pub fn build_resolver(&self) -> Result<ChainResolver> {
        let resolver = match &self.patterns {
            Some(patterns) => ChainResolver::new(self.resolver.clone(), patterns)?,
            None => ChainResolver::new(self.resolver.clone(), &PatternConfig::default())?,
        };
        Ok(resolver)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_resolver::ClusterStrategy;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.resolver, ResolverConfig::default());
        assert!(config.patterns.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.resolver = ResolverConfig {
            strategy: ClusterStrategy::Connected,
            ..ResolverConfig::strict()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_settings_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.resolver, ResolverConfig::default());
    }

    #[test]
    fn test_invalid_resolver_section_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.resolver.phone_prefix_len = 0;
        fs::write(&path, config.to_toml().unwrap()).unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_build_resolver_with_custom_patterns() {
        let config = Config {
            patterns: Some(PatternConfig {
                known_chains: vec![r"\bacme\b".to_string()],
                ..PatternConfig::default()
            }),
            ..Config::default()
        };
        let resolver = config.build_resolver().unwrap();
        assert_eq!(resolver.patterns().known_chain_count(), 1);
    }
}
