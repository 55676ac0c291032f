//! JSON body extractor for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>`, but any failure to read or
//! deserialize the body becomes a bare `400 Bad Request` with no body.
//! Field-level rules are not checked here; the user service collects those
//! so they can be reported together with the cross-reference checks.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

/// An extractor that deserializes a JSON request body.
///
/// # Usage
///
/// ```ignore
/// async fn handler(JsonBody(body): JsonBody<UserRequest>) {
///     // `body` was well-formed JSON of the expected shape
/// }
/// ```
pub struct JsonBody<T>(pub T);

/// Error type for `JsonBody` extraction failures.
pub struct JsonBodyRejection(pub JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        debug!(reason = %self.0.body_text(), "Rejected request body");
        StatusCode::BAD_REQUEST.into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;

        Ok(JsonBody(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
