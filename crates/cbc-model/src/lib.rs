//! # cbc-model: Strict Models for Loose Documents
//!
//! Each module takes one loosely-typed document, the boolean function that
//! used to guard it, and a strict type that makes the function unnecessary.
//!
//! | Module       | Loose form            | Legacy validator             | Strict type         |
//! |--------------|-----------------------|------------------------------|---------------------|
//! | [`shipping`] | `ShippingForm`        | `is_valid_shipping_info`     | `ShippingInfo`      |
//! | [`grading`]  | `GradingForm`         | `is_valid_grading_policy`    | `GradingPolicy`     |
//! | [`course`]   | `CourseForm`          | `is_valid_course_status`     | `CourseStatus`      |
//! | [`email`]    | `TemplatedEmailForm`  | `is_valid_templated_email`   | `TemplatedEmail`    |
//!
//! The conversion from loose to strict is `TryFrom` and fails with a
//! [`ShapeError`] naming the rule that was broken. The legacy validators are
//! kept so that the two can be checked against each other: for every module,
//! conversion succeeds exactly when the validator returns `true` (where the
//! strict side checks more, such as phone number syntax, the module says so).
//!
//! The patterns are the same throughout. An "or" between fields becomes an
//! enum; an "and" becomes a struct; two numbers with an ordering constraint
//! become one number plus a non-negative offset.

pub mod course;
pub mod email;
pub mod error;
pub mod grading;
pub mod shipping;

pub use course::{is_valid_course_status, CourseForm, CourseStatus};
pub use email::{is_valid_templated_email, Html, TemplatedEmail, TemplatedEmailForm};
pub use error::ShapeError;
pub use grading::{is_valid_grading_policy, GradingForm, GradingPolicy, LatePenalty};
pub use shipping::{is_valid_shipping_info, PickupInfo, ShippingForm, ShippingInfo};
