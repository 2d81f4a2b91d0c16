use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// Everything a workflow call can fail with.
///
/// The first three are ordinary rejections of the request; the rest are
/// infrastructure faults.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("username is already registered")]
    DuplicateUsername,

    #[error("unknown username or wrong password")]
    Unauthorized,

    #[error("invalid input")]
    InvalidInput,

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUsername => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An unreadable body (not JSON, missing or null fields) fails the request
/// with the route's own rejection instead of the extractor's status.
pub(crate) fn reject_body(rejection: JsonRejection, rejected_as: ApiError) -> ApiError {
    debug!("Unreadable request body: {}", rejection.body_text());
    rejected_as
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }
        // Rejections carry no body
        status.into_response()
    }
}
