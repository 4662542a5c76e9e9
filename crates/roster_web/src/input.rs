//! Request-body extraction for student submissions.
//!
//! Accepts `application/x-www-form-urlencoded` and `application/json`. Any
//! other (or missing) content type is read as an empty submission, which the
//! model then rejects field by field.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use roster_core::StudentDraft;

/// A decoded, not yet validated, student submission.
#[derive(Debug, Clone)]
pub struct StudentSubmission(pub StudentDraft);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Form,
    Json,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

fn malformed_body(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

#[async_trait]
impl<S> FromRequest<S> for StudentSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(req.headers()) {
            BodyKind::Form => Form::<StudentDraft>::from_request(req, state)
                .await
                .map(|Form(draft)| Self(draft))
                .map_err(|rejection| malformed_body(rejection.body_text())),
            BodyKind::Json => Json::<StudentDraft>::from_request(req, state)
                .await
                .map(|Json(draft)| Self(draft))
                .map_err(|rejection| malformed_body(rejection.body_text())),
            BodyKind::Other => Ok(Self(StudentDraft::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{body_kind, BodyKind};
    use axum::http::{header, HeaderMap, HeaderValue};

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn detects_supported_content_types() {
        assert_eq!(
            body_kind(&with_content_type("application/x-www-form-urlencoded")),
            BodyKind::Form
        );
        assert_eq!(
            body_kind(&with_content_type("Application/JSON; charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(
            body_kind(&with_content_type("application/vnd.api+json")),
            BodyKind::Json
        );
    }

    #[test]
    fn anything_else_is_an_empty_submission() {
        assert_eq!(body_kind(&HeaderMap::new()), BodyKind::Other);
        assert_eq!(body_kind(&with_content_type("text/plain")), BodyKind::Other);
    }
}
