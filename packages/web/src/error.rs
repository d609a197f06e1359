//! HTTP mapping for [`AppError`].
//!
//! Most expected failures never reach this type — handlers turn them into a
//! flash message plus redirect. What does reach it is rendered as a plain
//! status page: 404 for missing entries, 500 for infrastructure failures.

use api::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub struct WebError(pub AppError);

impl<E> From<E> for WebError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::AuthFailure => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Session(_) | AppError::PasswordHash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }

        (status, self.0.to_string()).into_response()
    }
}
