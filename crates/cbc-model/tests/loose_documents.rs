//! Loose documents from YAML fixtures, through the legacy validator and the
//! strict conversion.

use cbc_model::{
    is_valid_course_status, is_valid_grading_policy, is_valid_shipping_info,
    is_valid_templated_email, CourseForm, CourseStatus, GradingForm, GradingPolicy, LatePenalty,
    PickupInfo, ShapeError, ShippingForm, ShippingInfo, TemplatedEmail, TemplatedEmailForm,
};

#[test]
fn shipping_from_yaml() {
    let form: ShippingForm = serde_yaml::from_str(
        "name: Avril Mondragon\nmobilePhone: 555-0101\npoBox: Enfield Tennis Academy\n",
    )
    .unwrap();
    assert!(is_valid_shipping_info(&form));
    let info = ShippingInfo::try_from(form).unwrap();
    let PickupInfo::PoBox { phone_number, .. } = info.pickup_info else {
        panic!("expected PO box");
    };
    assert_eq!(phone_number.right().map(|p| p.digits()).as_deref(), Some("5550101"));
}

#[test]
fn grading_from_yaml() {
    let good: GradingForm = serde_yaml::from_str(
        "curveMinimum: 0.5\ncurveMaximum: 1\npassingGrade: 0.7\nlatePenaltyPerWeek: 0.1\n",
    )
    .unwrap();
    assert!(is_valid_grading_policy(&good));
    let policy = GradingPolicy::try_from(good).unwrap();
    assert!(matches!(policy.late_penalty, Some(LatePenalty::PerWeek(_))));

    let bad: GradingForm = serde_yaml::from_str(
        "curveMinimum: 0.5\ncurveMaximum: 0.8\npassingGrade: 0.9\nlatePenaltyPerDay: 0.01\nlatePenaltyPerWeek: 0.1\n",
    )
    .unwrap();
    assert!(!is_valid_grading_policy(&bad));
    assert!(GradingPolicy::try_from(bad).is_err());
}

#[test]
fn course_from_yaml() {
    let form: CourseForm = serde_yaml::from_str(
        "startedAt: \"2026-03-01T09:00:00Z\"\ncompletedAt: \"2026-03-08T09:00:00Z\"\ncourseGrade: 0.91\n",
    )
    .unwrap();
    assert!(is_valid_course_status(&form));
    let status = CourseStatus::try_from(form).unwrap();
    assert_eq!(
        status.completed_at().map(|t| t.to_iso8601()).as_deref(),
        Some("2026-03-08T09:00:00Z")
    );
}

#[test]
fn course_with_offset_timestamp_rejected() {
    let form = CourseForm {
        started_at: Some("2026-03-01T09:00:00+02:00".into()),
        ..CourseForm::default()
    };
    assert!(!is_valid_course_status(&form));
    assert!(matches!(
        CourseStatus::try_from(form),
        Err(ShapeError::Validation(_))
    ));
}

#[test]
fn templated_email_from_json() {
    let form: TemplatedEmailForm = serde_json::from_value(serde_json::json!({
        "headerKeys": ["Subject", "X-Campaign"],
        "headerValues": ["Your results", "spring-term"],
        "body": "<h1>Results</h1>",
        "recipients": ["hal@enfield.edu", "pemulis@enfield.edu"]
    }))
    .unwrap();
    assert!(is_valid_templated_email(&form));
    let email = TemplatedEmail::try_from(form).unwrap();
    assert_eq!(email.header("x-campaign"), Some("spring-term"));
    assert!(email
        .recipients()
        .iter()
        .any(|r| r.local_part() == "pemulis"));
}
