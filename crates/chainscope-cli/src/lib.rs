//! Chainscope CLI library.
//!
//! Command-line front end for the chain resolver: JSON record files in,
//! clusters and verdicts out, with configuration management and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod source;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use source::{JsonClusterFile, JsonRecordFile};
