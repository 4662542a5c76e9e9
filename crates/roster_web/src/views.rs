//! Named HTML views rendered through minijinja.
//!
//! Templates live under `templates/` and are compiled into the binary. Every
//! `.html` template is auto-escaped, so submitted values are safe to echo back.

use minijinja::{context, Environment};
use roster_core::{Student, StudentDraft, StudentField};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("student_fields.html", include_str!("../templates/student_fields.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("create.html", include_str!("../templates/create.html")),
    ("edit.html", include_str!("../templates/edit.html")),
];

/// The three pages the application renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    Create,
    Edit,
}

impl View {
    fn template(self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Create => "create.html",
            Self::Edit => "edit.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Index => "Student List",
            Self::Create => "Add New Student",
            Self::Edit => "Edit Student",
        }
    }
}

#[derive(Debug)]
pub struct ViewError(minijinja::Error);

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<minijinja::Error> for ViewError {
    fn from(value: minijinja::Error) -> Self {
        Self(value)
    }
}

/// Values shown in the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentFormValues {
    pub id: Option<String>,
    pub name: String,
    pub roll_number: String,
    pub email: String,
    pub course: String,
}

impl StudentFormValues {
    /// Echoes a submission back exactly as received.
    pub fn from_draft(draft: &StudentDraft) -> Self {
        let raw = |field| draft.raw(field).unwrap_or_default().to_string();
        Self {
            id: None,
            name: raw(StudentField::Name),
            roll_number: raw(StudentField::RollNumber),
            email: raw(StudentField::Email),
            course: raw(StudentField::Course),
        }
    }

    pub fn from_student(student: &Student) -> Self {
        Self {
            id: Some(student.id.to_string()),
            name: student.name.clone(),
            roll_number: student.roll_number.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
        }
    }

    /// Attempted values laid over the stored record, keeping the requested id.
    ///
    /// Submitted fields win; fields absent from the submission fall back to
    /// the stored record when there is one.
    pub fn merged(id: &str, attempted: &StudentDraft, stored: Option<&Student>) -> Self {
        let pick = |field: StudentField, stored_value: Option<&String>| {
            attempted
                .raw(field)
                .map(str::to_string)
                .or_else(|| stored_value.cloned())
                .unwrap_or_default()
        };
        Self {
            id: Some(id.to_string()),
            name: pick(StudentField::Name, stored.map(|s| &s.name)),
            roll_number: pick(StudentField::RollNumber, stored.map(|s| &s.roll_number)),
            email: pick(StudentField::Email, stored.map(|s| &s.email)),
            course: pick(StudentField::Course, stored.map(|s| &s.course)),
        }
    }
}

/// Compiled template set.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render_index(&self, students: &[Student]) -> Result<String, ViewError> {
        self.render(
            View::Index,
            context! { title => View::Index.title(), students => students },
        )
    }

    /// Renders the create (or edit) form with optional error text.
    pub fn render_form(
        &self,
        view: View,
        student: &StudentFormValues,
        error: Option<&str>,
    ) -> Result<String, ViewError> {
        self.render(
            view,
            context! { title => view.title(), student => student, error => error },
        )
    }

    fn render(&self, view: View, ctx: minijinja::Value) -> Result<String, ViewError> {
        let template = self.env.get_template(view.template())?;
        Ok(template.render(ctx)?)
    }
}
