//! Student domain model.
//!
//! # Responsibility
//! - Define the persisted `Student` record.
//! - Turn untrusted submissions (`StudentDraft`) into normalized
//!   `StudentFields`, reporting every failing field at once.
//!
//! # Invariants
//! - `id` is assigned once on creation and never changes.
//! - `name`, `roll_number`, `email`, `course` are non-empty after trimming.
//! - `email` is stored lowercase.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to a student on creation.
pub type StudentId = Uuid;

/// Canonical persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub roll_number: String,
    pub email: String,
    pub course: String,
    /// Unix epoch milliseconds, set by storage on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed by storage on every update.
    pub updated_at: i64,
}

/// Raw student submission as received from a form or JSON body.
///
/// Every field is optional: a missing field is reported by validation, not
/// by decoding. Field names follow the external wire naming (`rollNumber`).
/// Scalar values (numbers, booleans) are taken as their text; `null` counts
/// as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub roll_number: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub course: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarText)
}

struct ScalarText;

impl<'de> Visitor<'de> for ScalarText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Validated, normalized business fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub roll_number: String,
    pub email: String,
    pub course: String,
}

/// Business field of a student, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    RollNumber,
    Email,
    Course,
}

impl StudentField {
    /// External (wire) name of the field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RollNumber => "rollNumber",
            Self::Email => "email",
            Self::Course => "course",
        }
    }

    /// Message reported when the field is missing or blank.
    pub fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Student name is required",
            Self::RollNumber => "Roll number is required",
            Self::Email => "Email is required",
            Self::Course => "Course is required",
        }
    }
}

/// One or more required fields were missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentValidationError {
    missing: Vec<StudentField>,
}

impl StudentValidationError {
    /// Fields that failed validation, in schema order.
    pub fn fields(&self) -> &[StudentField] {
        &self.missing
    }
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Student validation failed: ")?;
        for (index, field) in self.missing.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.wire_name(), field.required_message())?;
        }
        Ok(())
    }
}

impl Error for StudentValidationError {}

impl StudentDraft {
    /// Builds a draft with every field present.
    pub fn new(
        name: impl Into<String>,
        roll_number: impl Into<String>,
        email: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            roll_number: Some(roll_number.into()),
            email: Some(email.into()),
            course: Some(course.into()),
        }
    }

    /// Raw submitted value for `field`, untouched.
    pub fn raw(&self, field: StudentField) -> Option<&str> {
        match field {
            StudentField::Name => self.name.as_deref(),
            StudentField::RollNumber => self.roll_number.as_deref(),
            StudentField::Email => self.email.as_deref(),
            StudentField::Course => self.course.as_deref(),
        }
    }

    /// Trims, normalizes and checks every business field.
    ///
    /// # Errors
    /// Returns `StudentValidationError` listing every field that is missing or
    /// blank after trimming.
    pub fn validate(&self) -> Result<StudentFields, StudentValidationError> {
        let mut missing = Vec::new();
        let mut take = |field: StudentField| -> String {
            let value = self.raw(field).map(str::trim).unwrap_or_default();
            if value.is_empty() {
                missing.push(field);
            }
            value.to_string()
        };

        let name = take(StudentField::Name);
        let roll_number = take(StudentField::RollNumber);
        let email = take(StudentField::Email).to_lowercase();
        let course = take(StudentField::Course);

        if !missing.is_empty() {
            return Err(StudentValidationError { missing });
        }

        Ok(StudentFields {
            name,
            roll_number,
            email,
            course,
        })
    }
}

impl StudentFields {
    /// Normalized value of `field`.
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Email => &self.email,
            StudentField::Course => &self.course,
        }
    }
}
