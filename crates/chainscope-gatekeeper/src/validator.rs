//! Record validation logic

use crate::ValidationConfig;
use chainscope_domain::{BusinessRecord, RecordId};
use std::collections::HashSet;
use std::fmt;

/// Result of record validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the record passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,

    /// Quality score (0.0-1.0)
    pub quality_score: f64,
}

impl ValidationResult {
    /// True if the record was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Record accepted
    Accepted,

    /// Record rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Identifier is empty or whitespace
    EmptyId,

    /// Name is empty or whitespace
    EmptyName,

    /// Name exceeds the configured length
    NameTooLong {
        /// Actual length in chars
        length: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Coordinates out of range or not finite
    InvalidCoordinates {
        /// Latitude supplied
        latitude: f64,
        /// Longitude supplied
        longitude: f64,
    },

    /// Phone number has too few digits
    InvalidPhone {
        /// Phone as supplied
        phone: String,
        /// Minimum digit count
        min_digits: usize,
    },

    /// Identifier already seen earlier in the batch
    DuplicateId {
        /// The repeated identifier
        id: RecordId,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EmptyId => write!(f, "record id is empty"),
            RejectionReason::EmptyName => write!(f, "business name is empty"),
            RejectionReason::NameTooLong { length, max } => {
                write!(f, "name is {} chars, limit is {}", length, max)
            }
            RejectionReason::InvalidCoordinates { latitude, longitude } => {
                write!(f, "coordinates ({}, {}) are out of range", latitude, longitude)
            }
            RejectionReason::InvalidPhone { phone, min_digits } => {
                write!(f, "phone '{}' has fewer than {} digits", phone, min_digits)
            }
            RejectionReason::DuplicateId { id } => write!(f, "duplicate record id '{}'", id),
        }
    }
}

/// Outcome of validating a batch
#[derive(Debug, Clone)]
pub struct BatchValidation<'a> {
    /// Records that passed, in input order
    pub accepted: Vec<&'a BusinessRecord>,

    /// Records that failed, with their results, in input order
    pub rejected: Vec<(&'a BusinessRecord, ValidationResult)>,
}

impl BatchValidation<'_> {
    /// Owned copies of the accepted records
    pub fn accepted_records(&self) -> Vec<BusinessRecord> {
        self.accepted.iter().map(|r| (*r).clone()).collect()
    }
}

/// The Gatekeeper validates business records at the ingestion boundary
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single record against the configured rules
    pub fn validate(&self, record: &BusinessRecord) -> ValidationResult {
        let mut reasons = Vec::new();
        let mut quality_score: f64 = 1.0;

        // 1. Required fields
        if record.id.is_blank() {
            reasons.push(RejectionReason::EmptyId);
            quality_score -= 0.5;
        }
        if record.name.trim().is_empty() {
            reasons.push(RejectionReason::EmptyName);
            quality_score -= 0.5;
        }

        // 2. Name length
        let length = record.name.chars().count();
        if length > self.config.max_name_length {
            reasons.push(RejectionReason::NameTooLong {
                length,
                max: self.config.max_name_length,
            });
            quality_score -= 0.2;
        }

        // 3. Coordinates
        if self.config.validate_coordinates {
            if let Some(coordinates) = record.coordinates.filter(|c| !c.is_valid()) {
                reasons.push(RejectionReason::InvalidCoordinates {
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                });
                quality_score -= 0.3;
            }
        }

        // 4. Phone
        if self.config.validate_phone {
            if let Some(phone) = &record.phone {
                let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
                if digits < self.config.min_phone_digits {
                    reasons.push(RejectionReason::InvalidPhone {
                        phone: phone.clone(),
                        min_digits: self.config.min_phone_digits,
                    });
                    quality_score -= 0.2;
                }
            }
        }

        Self::finish(reasons, quality_score)
    }

    /// Validate a batch, rejecting repeated ids after their first accepted occurrence
    pub fn validate_batch<'a>(&self, records: &'a [BusinessRecord]) -> BatchValidation<'a> {
        let mut seen: HashSet<&RecordId> = HashSet::new();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for record in records {
            let mut result = self.validate(record);

            if self.config.validate_duplicates && result.is_accepted() && seen.contains(&record.id) {
                result = Self::finish(
                    vec![RejectionReason::DuplicateId {
                        id: record.id.clone(),
                    }],
                    result.quality_score - 0.5,
                );
            }

            if result.is_accepted() {
                seen.insert(&record.id);
                accepted.push(record);
            } else {
                rejected.push((record, result));
            }
        }

        BatchValidation { accepted, rejected }
    }

    fn finish(reasons: Vec<RejectionReason>, quality_score: f64) -> ValidationResult {
        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        ValidationResult {
            status,
            reasons,
            quality_score: quality_score.max(0.0),
        }
    }
}
