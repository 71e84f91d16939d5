//! # Response Types
//!
//! Shared response envelopes: the `{"error": ...}` body used by every
//! failure path, and the trimmed payloads intent operations return in
//! place of full provider objects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pos_core::{BackendError, Resource};
use serde::Serialize;

/// Error response: every failure is `{"error": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Wrapper rendering a [`BackendError`] as its HTTP response.
#[derive(Debug)]
pub struct ApiError(pub BackendError);

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

/// Trimmed intent payload: enough for the POS client to continue the
/// flow without the full PaymentIntent. Absent fields serialize as null.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct IntentSummary {
    pub intent: Option<String>,
    pub secret: Option<String>,
}

impl IntentSummary {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            intent: resource.id().map(str::to_string),
            secret: resource.client_secret().map(str::to_string),
        }
    }
}

/// Connection token payload: the SDK only needs the secret.
#[derive(Debug, Serialize)]
pub struct ConnectionTokenSummary {
    pub secret: Option<String>,
}

impl ConnectionTokenSummary {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            secret: resource.secret().map(str::to_string),
        }
    }
}
