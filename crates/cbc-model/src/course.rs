//! # Course Status
//!
//! A learner's progress through a course: not started, started, or finished
//! with a grade. The loose shape is three optional fields; only some
//! combinations make sense, and a completion time before the start time is
//! nonsense that the loose shape happily stores.
//!
//! [`CourseStatus`] names each state and stores a completed course as its
//! start plus an [`ElapsedTime`], which cannot be negative. The completion
//! time is derived.

use serde::{Deserialize, Serialize};

use cbc_core::{ElapsedTime, ProperFraction, Timestamp, ValidationError};

use crate::error::ShapeError;

/// Course progress with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_grade: Option<f64>,
}

/// Legacy validator.
///
/// No start means nothing else may be set. A start alone is an incomplete
/// course. A start, a completion no earlier than the start, and a grade in
/// `[0, 1]` is a complete course. Anything else is invalid, including
/// timestamps that do not parse.
pub fn is_valid_course_status(form: &CourseForm) -> bool {
    match (&form.started_at, &form.completed_at, form.course_grade) {
        (None, None, None) => true,
        (Some(start), None, None) => Timestamp::parse(start).is_ok(),
        (Some(start), Some(end), Some(grade)) => {
            match (Timestamp::parse(start), Timestamp::parse(end)) {
                (Ok(start), Ok(end)) => start <= end && (0.0..=1.0).contains(&grade),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Where a learner stands in a course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CourseStatus {
    /// Not begun; no times and no grade.
    Unstarted,
    /// Begun but not finished.
    #[serde(rename_all = "camelCase")]
    Incomplete {
        /// When the learner started.
        started_at: Timestamp,
    },
    /// Finished and graded. The end is stored as a duration from the start,
    /// so it cannot precede it.
    #[serde(rename_all = "camelCase")]
    Complete {
        /// When the learner started.
        started_at: Timestamp,
        /// Time from start to completion.
        duration: ElapsedTime,
        /// The final grade.
        course_grade: ProperFraction,
    },
}

impl CourseStatus {
    /// A completed course, from its start and end times.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeInterval`] if `completed_at`
    /// precedes `started_at`.
    pub fn complete(
        started_at: Timestamp,
        completed_at: Timestamp,
        course_grade: ProperFraction,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Complete {
            started_at,
            duration: started_at.elapsed_until(&completed_at)?,
            course_grade,
        })
    }

    /// When the learner started, if they have.
    pub fn started_at(&self) -> Option<Timestamp> {
        match self {
            Self::Unstarted => None,
            Self::Incomplete { started_at } | Self::Complete { started_at, .. } => {
                Some(*started_at)
            }
        }
    }

    /// When the learner finished, derived from start and duration.
    pub fn completed_at(&self) -> Option<Timestamp> {
        match self {
            Self::Complete {
                started_at,
                duration,
                ..
            } => Some(started_at.advanced_by(*duration)),
            _ => None,
        }
    }

    /// The final grade, once complete.
    pub fn course_grade(&self) -> Option<ProperFraction> {
        match self {
            Self::Complete { course_grade, .. } => Some(*course_grade),
            _ => None,
        }
    }

    /// Whether the course has been finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

impl TryFrom<CourseForm> for CourseStatus {
    type Error = ShapeError;

    fn try_from(form: CourseForm) -> Result<Self, Self::Error> {
        let Some(started_at) = form.started_at else {
            if form.completed_at.is_some() {
                return Err(ShapeError::UnexpectedField("completedAt"));
            }
            if form.course_grade.is_some() {
                return Err(ShapeError::UnexpectedField("courseGrade"));
            }
            return Ok(Self::Unstarted);
        };
        let started_at = Timestamp::parse(&started_at)?;

        match (form.completed_at, form.course_grade) {
            (None, None) => Ok(Self::Incomplete { started_at }),
            (Some(completed_at), Some(grade)) => Ok(Self::complete(
                started_at,
                Timestamp::parse(&completed_at)?,
                ProperFraction::new(grade)?,
            )?),
            (Some(_), None) => Err(ShapeError::MissingField("courseGrade")),
            (None, Some(_)) => Err(ShapeError::MissingField("completedAt")),
        }
    }
}

impl From<&CourseStatus> for CourseForm {
    fn from(status: &CourseStatus) -> Self {
        CourseForm {
            started_at: status.started_at().map(|t| t.to_iso8601()),
            completed_at: status.completed_at().map(|t| t.to_iso8601()),
            course_grade: status.course_grade().map(ProperFraction::value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "2026-01-15T12:00:00Z";
    const END: &str = "2026-01-15T13:30:00Z";

    fn form(start: Option<&str>, end: Option<&str>, grade: Option<f64>) -> CourseForm {
        CourseForm {
            started_at: start.map(str::to_string),
            completed_at: end.map(str::to_string),
            course_grade: grade,
        }
    }

    #[test]
    fn unstarted() {
        let status = CourseStatus::try_from(CourseForm::default()).unwrap();
        assert_eq!(status, CourseStatus::Unstarted);
        assert_eq!(status.started_at(), None);
    }

    #[test]
    fn incomplete() {
        let status = CourseStatus::try_from(form(Some(START), None, None)).unwrap();
        assert_eq!(status.started_at().map(|t| t.to_iso8601()).as_deref(), Some(START));
        assert_eq!(status.completed_at(), None);
        assert!(!status.is_complete());
    }

    #[test]
    fn complete_stores_duration() {
        let status = CourseStatus::try_from(form(Some(START), Some(END), Some(0.85))).unwrap();
        let CourseStatus::Complete { duration, .. } = status else {
            panic!("expected complete");
        };
        assert_eq!(duration.as_secs(), 90 * 60);
        assert_eq!(status.completed_at().unwrap().to_iso8601(), END);
        assert_eq!(status.course_grade().unwrap().value(), 0.85);
    }

    #[test]
    fn completion_before_start_rejected() {
        let err = CourseStatus::try_from(form(Some(END), Some(START), Some(0.85))).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Validation(ValidationError::NegativeInterval { .. })
        ));
        assert!(!is_valid_course_status(&form(Some(END), Some(START), Some(0.85))));
    }

    #[test]
    fn partial_completion_rejected() {
        assert_eq!(
            CourseStatus::try_from(form(Some(START), Some(END), None)).unwrap_err(),
            ShapeError::MissingField("courseGrade")
        );
        assert_eq!(
            CourseStatus::try_from(form(None, None, Some(0.5))).unwrap_err(),
            ShapeError::UnexpectedField("courseGrade")
        );
    }

    #[test]
    fn grade_out_of_range_rejected() {
        assert!(CourseStatus::try_from(form(Some(START), Some(END), Some(1.1))).is_err());
    }

    #[test]
    fn strict_serde_shape() {
        let status = CourseStatus::try_from(form(Some(START), Some(END), Some(0.5))).unwrap();
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            serde_json::json!({
                "status": "complete",
                "startedAt": START,
                "duration": 5400,
                "courseGrade": 0.5
            })
        );
        assert_eq!(
            serde_json::to_value(CourseStatus::Unstarted).unwrap(),
            serde_json::json!({"status": "unstarted"})
        );
    }

    mod proptests {
        use super::*;
        use chrono::DateTime;
        use proptest::prelude::*;

        fn timestamp() -> impl Strategy<Value = String> {
            (1_600_000_000i64..1_900_000_000).prop_map(|secs| {
                DateTime::from_timestamp(secs, 0)
                    .map(|dt| Timestamp::from_utc(dt).to_iso8601())
                    .unwrap_or_default()
            })
        }

        fn arb_form() -> impl Strategy<Value = CourseForm> {
            (
                proptest::option::of(timestamp()),
                proptest::option::of(timestamp()),
                proptest::option::of(-0.5f64..1.5),
            )
                .prop_map(|(started_at, completed_at, course_grade)| CourseForm {
                    started_at,
                    completed_at,
                    course_grade,
                })
        }

        proptest! {
            #[test]
            fn strict_iff_legacy(form in arb_form()) {
                let legacy = is_valid_course_status(&form);
                prop_assert_eq!(CourseStatus::try_from(form).is_ok(), legacy);
            }

            #[test]
            fn strict_lowers_to_same_form(form in arb_form()) {
                if let Ok(status) = CourseStatus::try_from(form.clone()) {
                    prop_assert_eq!(CourseForm::from(&status), form);
                }
            }
        }
    }
}
