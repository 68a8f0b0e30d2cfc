use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::backend_client::BackendError;

/// Application-level error type.
/// Implements `IntoResponse` so page handlers can return `Result<T, AppError>`;
/// the user sees an HTML error page, never internal details.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload exceeds the configured body limit")]
    PayloadTooLarge,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    title: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid request", msg.clone()),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Upload too large",
                "The uploaded resume is too large".to_string(),
            ),
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                let status = match e.status() {
                    Some(401) | Some(403) => StatusCode::UNAUTHORIZED,
                    Some(404) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "Service unavailable", e.user_message())
            }
            AppError::Render(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "The page could not be rendered".to_string(),
                )
            }
        };

        match (ErrorPage { title, message: &message }).render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Error page failed to render: {e}");
                (status, message).into_response()
            }
        }
    }
}
