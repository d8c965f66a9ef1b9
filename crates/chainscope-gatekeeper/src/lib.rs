//! Chainscope Gatekeeper
//!
//! Validates business records at the ingestion boundary, before they reach
//! the resolver. The resolver itself never rejects input; malformed records
//! are stopped here.
//!
//! The Gatekeeper provides:
//! - Required field checks (id, name)
//! - Name length limits
//! - Coordinate range checks
//! - Phone digit checks
//! - Duplicate id detection within a batch
//!
//! # Examples
//!
//! ```
//! use chainscope_domain::BusinessRecord;
//! use chainscope_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//!
//! let records = vec![
//!     BusinessRecord::new("1", "Subway #4521"),
//!     BusinessRecord::new("2", ""),
//! ];
//! let batch = gatekeeper.validate_batch(&records);
//! assert_eq!(batch.accepted.len(), 1);
//! assert_eq!(batch.rejected.len(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{BatchValidation, Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
