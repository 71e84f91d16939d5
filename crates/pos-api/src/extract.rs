//! Body extraction.
//!
//! One extractor normalizes every request body through
//! [`pos_core::parse_body`], so handlers see a [`ParamsMap`] whether the
//! client sent JSON, a form, or nothing at all.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use pos_core::{parse_body, BackendError, ParamsMap};

use crate::response::ApiError;

/// Normalized request parameters.
#[derive(Debug, Clone, Default)]
pub struct Params(pub ParamsMap);

impl<S> FromRequest<S> for Params
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError(BackendError::Internal))?;

        let params = parse_body(&bytes, content_type.as_deref())
            .map_err(|e| ApiError(BackendError::from(e)))?;

        Ok(Self(params))
    }
}
