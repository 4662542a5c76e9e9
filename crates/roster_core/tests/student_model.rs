use roster_core::{StudentDraft, StudentField};

#[test]
fn validate_trims_fields_and_lowercases_email() {
    let draft = StudentDraft::new("  Ada Lovelace ", " S042 ", "  Ada@Example.COM ", " Maths ");

    let fields = draft.validate().unwrap();
    assert_eq!(fields.name, "Ada Lovelace");
    assert_eq!(fields.roll_number, "S042");
    assert_eq!(fields.email, "ada@example.com");
    assert_eq!(fields.course, "Maths");
}

#[test]
fn validate_reports_every_missing_field_in_schema_order() {
    let draft = StudentDraft {
        name: Some("John".to_string()),
        ..StudentDraft::default()
    };

    let err = draft.validate().unwrap_err();
    assert_eq!(
        err.fields(),
        &[StudentField::RollNumber, StudentField::Email, StudentField::Course]
    );
    assert_eq!(
        err.to_string(),
        "Student validation failed: rollNumber: Roll number is required, \
         email: Email is required, course: Course is required"
    );
}

#[test]
fn whitespace_only_values_count_as_missing() {
    let draft = StudentDraft::new("   ", "S001", "john@example.com", "\t");

    let err = draft.validate().unwrap_err();
    assert_eq!(err.fields(), &[StudentField::Name, StudentField::Course]);
    assert!(err.to_string().contains("Student name is required"));
}

#[test]
fn draft_deserializes_wire_field_names() {
    let draft: StudentDraft = serde_json::from_value(serde_json::json!({
        "name": "Jane Doe",
        "rollNumber": "S002",
        "email": "jane@example.com",
    }))
    .unwrap();

    assert_eq!(draft.roll_number.as_deref(), Some("S002"));
    assert_eq!(draft.course, None);
    assert_eq!(draft.raw(StudentField::Email), Some("jane@example.com"));
}

#[test]
fn draft_takes_scalar_json_values_as_text() {
    let draft: StudentDraft = serde_json::from_value(serde_json::json!({
        "name": "Jane Doe",
        "rollNumber": 7,
        "email": null,
        "course": true,
    }))
    .unwrap();

    assert_eq!(draft.roll_number.as_deref(), Some("7"));
    assert_eq!(draft.email, None);
    assert_eq!(draft.course.as_deref(), Some("true"));

    let nested = serde_json::from_value::<StudentDraft>(serde_json::json!({ "name": ["a", "b"] }));
    assert!(nested.is_err());
}
