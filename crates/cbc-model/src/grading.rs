//! # Grading Policy
//!
//! A policy names a curve `[minimum, maximum]`, a passing grade inside it,
//! and at most one late penalty. The loose [`GradingForm`] stores all three
//! as absolute numbers and needs [`is_valid_grading_policy`] to check that
//! they are in range and in order.
//!
//! [`GradingPolicy`] stores the relationships instead of the endpoints:
//!
//! - `curve_minimum` is absolute.
//! - `curve_maximum` is the fraction of the way from the minimum to 1.
//! - `passing_grade` is the fraction of the way from the minimum to the
//!   maximum.
//!
//! Any three [`ProperFraction`]s then describe a policy whose passing grade
//! lies inside its curve. The one state the encoding still admits is a
//! zero-width curve (`curve_maximum == 0`, or `curve_minimum == 1`);
//! [`GradingPolicy::from_absolute`] refuses it, as the legacy check does.
//!
//! ```
//! use cbc_core::ProperFraction;
//! use cbc_model::grading::{GradingPolicy, LatePenalty};
//!
//! let policy = GradingPolicy::from_absolute(
//!     0.5,
//!     1.0,
//!     0.7,
//!     Some(LatePenalty::PerWeek(ProperFraction::new(0.1).unwrap())),
//! )
//! .unwrap();
//!
//! // 0.7 is four tenths of the way from 0.5 to 1.
//! assert!((policy.passing_grade.value() - 0.4).abs() < 1e-9);
//! assert!((policy.absolute_passing_grade().value() - 0.7).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use cbc_core::ProperFraction;

use crate::error::ShapeError;

/// Grading policy with absolute numbers and both penalty kinds optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingForm {
    pub curve_minimum: f64,
    pub curve_maximum: f64,
    pub passing_grade: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_penalty_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_penalty_per_week: Option<f64>,
}

fn valid_grade(n: f64) -> bool {
    (0.0..=1.0).contains(&n)
}

/// Legacy validator.
///
/// Checks the three grades are in `[0, 1]` and ordered, and that at most one
/// penalty is given. The penalty values themselves are not range-checked.
pub fn is_valid_grading_policy(form: &GradingForm) -> bool {
    valid_grade(form.curve_minimum)
        && valid_grade(form.curve_maximum)
        && valid_grade(form.passing_grade)
        && form.curve_minimum < form.curve_maximum
        && form.curve_minimum <= form.passing_grade
        && form.passing_grade <= form.curve_maximum
        && (form.late_penalty_per_day.is_none() || form.late_penalty_per_week.is_none())
}

/// A late penalty, per day or per week. The units differ, so the two are
/// separate variants rather than one number with a flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "penalty")]
pub enum LatePenalty {
    #[serde(rename = "PenaltyPerDay")]
    PerDay(ProperFraction),
    #[serde(rename = "PenaltyPerWeek")]
    PerWeek(ProperFraction),
}

impl LatePenalty {
    /// The penalty fraction, whatever its period.
    pub fn penalty(self) -> ProperFraction {
        match self {
            Self::PerDay(p) | Self::PerWeek(p) => p,
        }
    }
}

/// Grading policy in the relative encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingPolicy {
    /// Lowest grade on the curve.
    pub curve_minimum: ProperFraction,
    /// Fraction of the span from `curve_minimum` to 1.
    pub curve_maximum: ProperFraction,
    /// Fraction of the span from `curve_minimum` to the absolute maximum.
    pub passing_grade: ProperFraction,
    /// At most one late penalty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_penalty: Option<LatePenalty>,
}

impl GradingPolicy {
    /// Build from absolute grades.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Validation`] if a grade is outside `[0, 1]`.
    /// - [`ShapeError::CurveOrder`] unless `minimum < maximum`.
    /// - [`ShapeError::PassingGradeOutsideCurve`] unless
    ///   `minimum <= passing <= maximum`.
    pub fn from_absolute(
        minimum: f64,
        maximum: f64,
        passing: f64,
        late_penalty: Option<LatePenalty>,
    ) -> Result<Self, ShapeError> {
        let curve_minimum = ProperFraction::new(minimum)?;
        ProperFraction::new(maximum)?;
        ProperFraction::new(passing)?;

        if minimum >= maximum {
            return Err(ShapeError::CurveOrder { minimum, maximum });
        }
        if passing < minimum || passing > maximum {
            return Err(ShapeError::PassingGradeOutsideCurve {
                passing,
                minimum,
                maximum,
            });
        }

        Ok(Self {
            curve_minimum,
            curve_maximum: ProperFraction::new((maximum - minimum) / (1.0 - minimum))?,
            passing_grade: ProperFraction::new((passing - minimum) / (maximum - minimum))?,
            late_penalty,
        })
    }

    /// The curve maximum as an absolute grade.
    pub fn absolute_curve_maximum(&self) -> ProperFraction {
        self.curve_maximum.lerp(self.curve_minimum, ProperFraction::ONE)
    }

    /// The passing grade as an absolute grade.
    pub fn absolute_passing_grade(&self) -> ProperFraction {
        self.passing_grade
            .lerp(self.curve_minimum, self.absolute_curve_maximum())
    }

    /// Whether the curve has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.absolute_curve_maximum().value() <= self.curve_minimum.value()
    }

    /// Whether `grade` passes.
    pub fn passes(&self, grade: ProperFraction) -> bool {
        grade.value() >= self.absolute_passing_grade().value()
    }
}

impl TryFrom<GradingForm> for GradingPolicy {
    type Error = ShapeError;

    fn try_from(form: GradingForm) -> Result<Self, Self::Error> {
        let late_penalty = match (form.late_penalty_per_day, form.late_penalty_per_week) {
            (Some(_), Some(_)) => {
                return Err(ShapeError::MutuallyExclusive {
                    first: "latePenaltyPerDay",
                    second: "latePenaltyPerWeek",
                })
            }
            (Some(day), None) => Some(LatePenalty::PerDay(ProperFraction::new(day)?)),
            (None, Some(week)) => Some(LatePenalty::PerWeek(ProperFraction::new(week)?)),
            (None, None) => None,
        };
        Self::from_absolute(
            form.curve_minimum,
            form.curve_maximum,
            form.passing_grade,
            late_penalty,
        )
    }
}
