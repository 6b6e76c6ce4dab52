//! # Proper Fractions
//!
//! [`ProperFraction`] is a number in the closed interval `[0, 1]`. Grades,
//! curve bounds and late penalties are all proper fractions; giving the
//! range check a name and a type means it is performed once, in one place,
//! and the type system tracks that it happened.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A number `n` with `0 <= n <= 1`.
///
/// NaN is rejected (it compares false against both bounds). Infinities are
/// out of range. `-0.0` is accepted and compares equal to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProperFraction(f64);

impl ProperFraction {
    /// The fraction `0`.
    pub const ZERO: Self = Self(0.0);

    /// The fraction `1`.
    pub const ONE: Self = Self(1.0);

    /// Create a proper fraction, rejecting values outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FractionOutOfRange`] for values below 0,
    /// above 1, or NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::FractionOutOfRange(value))
        }
    }

    /// The wrapped number.
    pub fn value(self) -> f64 {
        self.0
    }

    /// `1 - self`, which is also a proper fraction.
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }

    /// The point this fraction of the way from `low` to `high`.
    ///
    /// `lerp(a, b)` with `a <= b` stays inside `[a, b]`, so the result is a
    /// proper fraction whenever both bounds are.
    pub fn lerp(self, low: Self, high: Self) -> Self {
        let point = low.0 + self.0 * (high.0 - low.0);
        Self(point.clamp(0.0, 1.0))
    }
}

impl TryFrom<f64> for ProperFraction {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProperFraction> for f64 {
    fn from(f: ProperFraction) -> Self {
        f.0
    }
}

impl std::fmt::Display for ProperFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(ProperFraction::new(0.0).unwrap(), ProperFraction::ZERO);
        assert_eq!(ProperFraction::new(1.0).unwrap(), ProperFraction::ONE);
    }

    #[test]
    fn interior_value_accepted() {
        let f = ProperFraction::new(0.7).unwrap();
        assert_eq!(f.value(), 0.7);
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            ProperFraction::new(1.01),
            Err(ValidationError::FractionOutOfRange(1.01))
        );
        assert!(ProperFraction::new(-0.1).is_err());
        assert!(ProperFraction::new(f64::INFINITY).is_err());
        assert!(ProperFraction::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn nan_rejected() {
        assert!(ProperFraction::new(f64::NAN).is_err());
    }

    #[test]
    fn complement() {
        let f = ProperFraction::new(0.25).unwrap();
        assert_eq!(f.complement().value(), 0.75);
    }

    #[test]
    fn lerp_between_bounds() {
        let low = ProperFraction::new(0.5).unwrap();
        let high = ProperFraction::ONE;
        let mid = ProperFraction::new(0.4).unwrap().lerp(low, high);
        assert!((mid.value() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn serde_roundtrip() {
        let f = ProperFraction::new(0.1).unwrap();
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, "0.1");
        let parsed: ProperFraction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, f);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let result: Result<ProperFraction, _> = serde_json::from_str("1.5");
        assert!(result.is_err());
    }
}
