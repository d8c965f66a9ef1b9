//! Confidence score module

use std::fmt;

/// Aggregated strength of evidence that a record belongs to a chain
///
/// Always in [0, 1]. Construction clamps instead of panicking, so arithmetic
/// on raw signal weights can be handed over without pre-checking.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence
    pub const ZERO: Confidence = Confidence(0.0);

    /// Full confidence
    pub const CERTAIN: Confidence = Confidence(1.0);

    /// Create a confidence score, clamping into [0, 1]
    ///
    /// NaN maps to zero, and so does negative zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // -0.0 + 0.0 is +0.0
        Self(value.clamp(0.0, 1.0) + 0.0)
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check whether the score reaches a threshold
    pub fn meets(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }

    /// Value rounded to a whole percentage
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamps() {
        assert_eq!(Confidence::new(1.35).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(0.6).value(), 0.6);
    }

    #[test]
    fn test_nan_is_zero() {
        assert_eq!(Confidence::new(f64::NAN), Confidence::ZERO);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let c = Confidence::new(-0.0);
        assert!(c.value().is_sign_positive());
        assert_eq!(c.to_string(), "0.00");

        let empty_sum: f64 = std::iter::empty::<f64>().sum();
        assert!(Confidence::new(empty_sum).value().is_sign_positive());
    }

    #[test]
    fn test_meets_threshold() {
        let c = Confidence::new(0.5);
        assert!(c.meets(0.5));
        assert!(!c.meets(0.51));
    }

    #[test]
    fn test_percent_and_display() {
        let c = Confidence::new(0.854);
        assert_eq!(c.percent(), 85);
        assert_eq!(c.to_string(), "0.85");
    }
}
