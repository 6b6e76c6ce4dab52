//! # AtLeastOne
//!
//! "At least one of these two optional fields must be present" is a
//! disjunction, so it is encoded as a sum type with three cases rather than a
//! pair of `Option`s plus a check.

use serde::{Deserialize, Serialize};

/// One or both of an `A` and a `B`.
///
/// ```
/// use cbc_core::AtLeastOne;
///
/// let both = AtLeastOne::from_options(Some("home"), Some("mobile")).unwrap();
/// assert_eq!(both.left(), Some(&"home"));
/// assert_eq!(both.right(), Some(&"mobile"));
///
/// assert!(AtLeastOne::<&str, &str>::from_options(None, None).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "PascalCase")]
pub enum AtLeastOne<A, B> {
    /// Only the left value.
    Left {
        /// The left value.
        value: A,
    },
    /// Only the right value.
    Right {
        /// The right value.
        value: B,
    },
    /// Both values.
    Both {
        /// The left value.
        left: A,
        /// The right value.
        right: B,
    },
}

impl<A, B> AtLeastOne<A, B> {
    /// Build from two options; `None` when both are absent.
    pub fn from_options(left: Option<A>, right: Option<B>) -> Option<Self> {
        match (left, right) {
            (Some(left), Some(right)) => Some(Self::Both { left, right }),
            (Some(value), None) => Some(Self::Left { value }),
            (None, Some(value)) => Some(Self::Right { value }),
            (None, None) => None,
        }
    }

    /// The left value, if present.
    pub fn left(&self) -> Option<&A> {
        match self {
            Self::Left { value } | Self::Both { left: value, .. } => Some(value),
            Self::Right { .. } => None,
        }
    }

    /// The right value, if present.
    pub fn right(&self) -> Option<&B> {
        match self {
            Self::Right { value } | Self::Both { right: value, .. } => Some(value),
            Self::Left { .. } => None,
        }
    }

    /// Back to a pair of options, at least one of which is `Some`.
    pub fn into_options(self) -> (Option<A>, Option<B>) {
        match self {
            Self::Left { value } => (Some(value), None),
            Self::Right { value } => (None, Some(value)),
            Self::Both { left, right } => (Some(left), Some(right)),
        }
    }

    /// Apply `f` to the left value and `g` to the right value.
    pub fn map<C, D>(self, f: impl FnOnce(A) -> C, g: impl FnOnce(B) -> D) -> AtLeastOne<C, D> {
        match self {
            Self::Left { value } => AtLeastOne::Left { value: f(value) },
            Self::Right { value } => AtLeastOne::Right { value: g(value) },
            Self::Both { left, right } => AtLeastOne::Both {
                left: f(left),
                right: g(right),
            },
        }
    }
}

impl<A, B, E> AtLeastOne<Result<A, E>, Result<B, E>> {
    /// Turn a choice of results into a result of a choice, failing on the
    /// first error (left before right).
    pub fn transpose(self) -> Result<AtLeastOne<A, B>, E> {
        Ok(match self {
            Self::Left { value } => AtLeastOne::Left { value: value? },
            Self::Right { value } => AtLeastOne::Right { value: value? },
            Self::Both { left, right } => AtLeastOne::Both {
                left: left?,
                right: right?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_options_covers_all_cases() {
        assert_eq!(
            AtLeastOne::from_options(Some(1), None::<u8>),
            Some(AtLeastOne::Left { value: 1 })
        );
        assert_eq!(
            AtLeastOne::from_options(None::<u8>, Some(2)),
            Some(AtLeastOne::Right { value: 2 })
        );
        assert_eq!(
            AtLeastOne::from_options(Some(1), Some(2)),
            Some(AtLeastOne::Both { left: 1, right: 2 })
        );
        assert_eq!(AtLeastOne::<u8, u8>::from_options(None, None), None);
    }

    #[test]
    fn into_options_roundtrip() {
        let choice = AtLeastOne::<u8, &str>::Right { value: "x" };
        assert_eq!(choice.into_options(), (None, Some("x")));
    }

    #[test]
    fn map_each_side() {
        let choice = AtLeastOne::Both { left: 2, right: "ab" };
        let mapped = choice.map(|n| n * 10, str::len);
        assert_eq!(mapped, AtLeastOne::Both { left: 20, right: 2 });
    }

    #[test]
    fn transpose_propagates_error() {
        let ok: AtLeastOne<Result<u8, &str>, Result<u8, &str>> = AtLeastOne::Left { value: Ok(1) };
        assert_eq!(ok.transpose(), Ok(AtLeastOne::Left { value: 1 }));
        let bad: AtLeastOne<Result<u8, &str>, Result<u8, &str>> = AtLeastOne::Both {
            left: Ok(1),
            right: Err("bad right"),
        };
        assert_eq!(bad.transpose(), Err("bad right"));
    }

    #[test]
    fn serde_tagged() {
        let choice = AtLeastOne::<String, String>::Left {
            value: "555-4444".into(),
        };
        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json, serde_json::json!({"tag": "Left", "value": "555-4444"}));
    }
}
