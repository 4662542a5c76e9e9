//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Builds the application router over an explicitly constructed state.
///
/// Every route falls back to the `Page Not Found` handler for unsupported
/// methods, so unknown method/path pairs never surface as 405.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_students).fallback(handlers::page_not_found),
        )
        .route(
            "/create",
            get(handlers::show_create_form)
                .post(handlers::create_student)
                .fallback(handlers::page_not_found),
        )
        .route(
            "/edit/:id",
            get(handlers::show_edit_form)
                .post(handlers::update_student)
                .fallback(handlers::page_not_found),
        )
        .route(
            "/delete/:id",
            post(handlers::delete_student).fallback(handlers::page_not_found),
        )
        .fallback(handlers::page_not_found)
        .with_state(state)
}
