//! Request handlers for the six student routes and the fallback.
//!
//! Each handler performs at most two sequential storage calls and maps the
//! outcome to a rendered view, a `302 Location: /` redirect, or a plain-text
//! error whose body is the underlying message verbatim.

use crate::input::StudentSubmission;
use crate::state::AppState;
use crate::views::{StudentFormValues, View, ViewError};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use log::{error, warn};
use roster_core::StudentServiceError;

pub const PAGE_NOT_FOUND: &str = "Page Not Found";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn plain(status: StatusCode, message: impl Into<String>) -> Response {
    (status, message.into()).into_response()
}

fn page(status: StatusCode, rendered: Result<String, ViewError>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            error!("event=view_render module=http status=error error={err}");
            plain(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// `GET /`
pub async fn list_students(State(state): State<AppState>) -> Response {
    match state
        .with_students(|students| students.list_students())
        .await
    {
        Ok(students) => page(StatusCode::OK, state.views().render_index(&students)),
        Err(err) => {
            error!(
                "event=student_list module=http status=error error_code={} error={err}",
                err.code()
            );
            plain(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// `GET /create`
pub async fn show_create_form(State(state): State<AppState>) -> Response {
    page(
        StatusCode::OK,
        state
            .views()
            .render_form(View::Create, &StudentFormValues::default(), None),
    )
}

/// `POST /create`
///
/// Every failure re-renders the form with the submission exactly as typed.
pub async fn create_student(
    State(state): State<AppState>,
    StudentSubmission(draft): StudentSubmission,
) -> Response {
    let submitted = draft.clone();
    match state
        .with_students(move |students| students.create_student(&draft))
        .await
    {
        Ok(_) => redirect_to_list(),
        Err(err) => {
            warn!(
                "event=student_create module=http status=rejected error_code={}",
                err.code()
            );
            let message = err.to_string();
            page(
                StatusCode::BAD_REQUEST,
                state.views().render_form(
                    View::Create,
                    &StudentFormValues::from_draft(&submitted),
                    Some(&message),
                ),
            )
        }
    }
}

/// `GET /edit/:id`
pub async fn show_edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state
        .with_students(move |students| students.find_student(&id))
        .await
    {
        Ok(Some(student)) => page(
            StatusCode::OK,
            state.views().render_form(
                View::Edit,
                &StudentFormValues::from_student(&student),
                None,
            ),
        ),
        Ok(None) => plain(StatusCode::NOT_FOUND, STUDENT_NOT_FOUND),
        Err(err) => {
            warn!(
                "event=student_edit_form module=http status=error error_code={}",
                err.code()
            );
            plain(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

/// `POST /edit/:id`
///
/// On failure the stored record is fetched again so fields missing from the
/// submission can be redisplayed. A failing re-fetch becomes a 500.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    StudentSubmission(draft): StudentSubmission,
) -> Response {
    let (target, attempted) = (id.clone(), draft.clone());
    let err = match state
        .with_students(move |students| students.update_student(&target, &attempted))
        .await
    {
        Ok(_) => return redirect_to_list(),
        Err(StudentServiceError::NotFound(missing)) => {
            warn!("event=student_update module=http status=noop student_id={missing}");
            return redirect_to_list();
        }
        Err(err) => err,
    };

    warn!(
        "event=student_update module=http status=rejected error_code={}",
        err.code()
    );

    let lookup = id.clone();
    let stored = match state
        .with_students(move |students| students.find_student(&lookup))
        .await
    {
        Ok(stored) => stored,
        Err(refetch_err) => {
            error!(
                "event=student_update module=http status=error stage=refetch error_code={} error={refetch_err}",
                refetch_err.code()
            );
            return plain(StatusCode::INTERNAL_SERVER_ERROR, refetch_err.to_string());
        }
    };

    let message = err.to_string();
    page(
        StatusCode::BAD_REQUEST,
        state.views().render_form(
            View::Edit,
            &StudentFormValues::merged(&id, &draft, stored.as_ref()),
            Some(&message),
        ),
    )
}

/// `POST /delete/:id`
pub async fn delete_student(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state
        .with_students(move |students| students.delete_student(&id))
        .await
    {
        Ok(_) => redirect_to_list(),
        Err(err) => {
            warn!(
                "event=student_delete module=http status=error error_code={}",
                err.code()
            );
            plain(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

/// Any unmatched path, or a known path with an unsupported method.
pub async fn page_not_found() -> Response {
    plain(StatusCode::NOT_FOUND, PAGE_NOT_FOUND)
}
