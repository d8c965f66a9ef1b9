//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::source::JsonRecordFile;
use chainscope_domain::traits::RecordSource;
use chainscope_gatekeeper::{Gatekeeper, ValidationConfig};

/// Execute the validate command.
///
/// Fails when any record is rejected, so scripts can gate on the exit code.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let records = JsonRecordFile::new(&args.file).load_records()?;
    let gatekeeper = Gatekeeper::new(validation_config(&args, config));
    let batch = gatekeeper.validate_batch(&records);

    println!("{}", formatter.format_validation(&batch)?);

    if batch.rejected.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "{} of {} record(s) rejected",
            batch.rejected.len(),
            records.len()
        )))
    }
}

fn validation_config(args: &ValidateArgs, config: &Config) -> ValidationConfig {
    if args.strict {
        ValidationConfig::strict()
    } else {
        config.gatekeeper.clone()
    }
}
