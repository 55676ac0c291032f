//! Mapping of domain errors onto HTTP responses
//!
//! Fetch and delete failures carry no body: a missing or unknown id is a bare
//! `400`, a store fault a bare `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::domain::DomainError;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            warn!(error = %self.0, "Bad request");
            StatusCode::BAD_REQUEST.into_response()
        } else {
            error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
