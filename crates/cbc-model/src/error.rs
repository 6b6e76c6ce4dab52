//! # Shape Errors
//!
//! Why a loose document could not be converted into its strict model. The
//! legacy validators answer only yes or no; the conversions say which rule
//! failed.

use thiserror::Error;

use cbc_core::ValidationError;

/// A loose document does not have the shape its strict model requires.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A field failed its refinement.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required field, or one of a required pair, is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present that the rest of the document rules out.
    #[error("unexpected field: {0}")]
    UnexpectedField(&'static str),

    /// Two fields that may not both be present.
    #[error("fields {first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        first: &'static str,
        second: &'static str,
    },

    /// The curve minimum is not below the curve maximum.
    #[error("curve minimum {minimum} must be below curve maximum {maximum}")]
    CurveOrder { minimum: f64, maximum: f64 },

    /// The passing grade lies outside the curve.
    #[error("passing grade {passing} outside curve [{minimum}, {maximum}]")]
    PassingGradeOutsideCurve {
        passing: f64,
        minimum: f64,
        maximum: f64,
    },

    /// Header keys and values do not pair up.
    #[error("{keys} header keys but {values} header values")]
    HeaderCountMismatch { keys: usize, values: usize },

    /// The same header appears twice, ignoring case.
    #[error("duplicate header: {0}")]
    DuplicateHeader(String),

    /// The same recipient appears twice.
    #[error("duplicate recipient: {0}")]
    DuplicateRecipient(String),
}
