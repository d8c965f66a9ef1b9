//! Detect command implementation.

use crate::cli::DetectArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::source::JsonRecordFile;
use chainscope_domain::traits::RecordSource;
use chainscope_domain::{BusinessRecord, ChainDetectionResult};

/// Execute the detect command.
pub fn execute_detect(args: DetectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let pool = JsonRecordFile::new(&args.file).load_records()?;
    let subject = select_subject(&args, &pool)?;

    let resolver = config.build_resolver()?;
    let result = resolver.detect_chain(&subject, &pool);

    println!("{}", formatter.format_detection(&subject, &result)?);
    Ok(())
}

/// Detect against a pool without printing.
pub fn detect_in_pool(args: &DetectArgs, pool: &[BusinessRecord], config: &Config) -> Result<ChainDetectionResult> {
    let subject = select_subject(args, pool)?;
    Ok(config.build_resolver()?.detect_chain(&subject, pool))
}

/// Pick the subject: a pool record by id, or an ad-hoc record built from flags.
fn select_subject(args: &DetectArgs, pool: &[BusinessRecord]) -> Result<BusinessRecord> {
    if let Some(id) = &args.id {
        return pool
            .iter()
            .find(|r| r.id.as_str() == id)
            .cloned()
            .ok_or_else(|| CliError::NotFound(format!("No record with id '{}' in the pool", id)));
    }

    let name = args
        .name
        .as_deref()
        .ok_or_else(|| CliError::InvalidInput("Must specify either --id or --name".to_string()))?;

    let mut subject = BusinessRecord::new("adhoc", name);
    subject.phone = args.phone.clone();
    subject.website = args.website.clone();
    subject.city = args.city.clone();
    Ok(subject)
}
