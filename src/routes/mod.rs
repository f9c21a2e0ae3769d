pub mod admin;
pub mod public;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tower_http::services::ServeDir;

use shindig_core::ShindigError;

use crate::auth;
use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .merge(public::router())
        .merge(admin::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Convert errors bubbling out of handlers to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ShindigError> for AppError {
    fn from(err: ShindigError) -> Self {
        match err {
            ShindigError::InvalidIndex(_) => AppError::NotFound(err.to_string()),
            ShindigError::InvalidImage(_) | ShindigError::UnsupportedExtension(_) => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(
                    header::WWW_AUTHENTICATE,
                    format!("Basic realm=\"{}\"", auth::REALM),
                )],
                "Unauthorized",
            )
                .into_response(),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Gate for the admin-only routes.
pub fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<(), AppError> {
    if auth::authorized(headers, &state.config) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
