//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for record validation rules
///
/// Missing ids and names are always rejected; everything else is switchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest accepted business name, in chars
    pub max_name_length: usize,

    /// Reject coordinates outside latitude [-90, 90] / longitude [-180, 180]
    pub validate_coordinates: bool,

    /// Reject phone numbers with too few digits
    pub validate_phone: bool,

    /// Minimum digit count for a phone number
    pub min_phone_digits: usize,

    /// Reject records whose id already appeared in the batch
    pub validate_duplicates: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_length: 200,
            validate_coordinates: true,
            validate_phone: false,
            min_phone_digits: 7,
            validate_duplicates: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (required fields only)
    pub fn permissive() -> Self {
        Self {
            max_name_length: 1000,
            validate_coordinates: false,
            validate_phone: false,
            min_phone_digits: 0,
            validate_duplicates: false,
        }
    }

    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            max_name_length: 120,
            validate_coordinates: true,
            validate_phone: true,
            min_phone_digits: 10,
            validate_duplicates: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.validate_coordinates);
        assert!(config.validate_duplicates);
        assert!(!config.validate_phone);
        assert_eq!(config.max_name_length, 200);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.validate_duplicates);
        assert!(!config.validate_coordinates);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(config.validate_phone);
        assert_eq!(config.min_phone_digits, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ValidationConfig = toml::from_str("validate_phone = true").unwrap();
        assert!(config.validate_phone);
        assert_eq!(config.max_name_length, 200);
    }
}
