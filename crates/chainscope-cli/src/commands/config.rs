//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs, PresetArg};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { force, preset } => {
            init_config(path, preset, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote configuration to {}", path.display()))
            );
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Write a fresh configuration file with the given resolver preset.
fn init_config(path: &Path, preset: PresetArg, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config {
        resolver: preset.into(),
        ..Config::default()
    };
    config.save_to(path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscope_resolver::ResolverConfig;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_preset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, PresetArg::Lenient, false).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.resolver, ResolverConfig::lenient());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, PresetArg::Default, false).unwrap();
        assert!(matches!(
            init_config(&path, PresetArg::Strict, false),
            Err(CliError::Config(_))
        ));

        init_config(&path, PresetArg::Strict, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().resolver, ResolverConfig::strict());
    }
}
