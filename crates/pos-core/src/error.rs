//! # Backend Error Types
//!
//! Typed error handling for the terminal backend.
//! Every error maps onto exactly one HTTP status via [`BackendError::status_code`].

use thiserror::Error;

/// Failure of a single provider call.
///
/// The backend never retries: a `ProviderError` is terminal for the request
/// that triggered it and surfaces as a 402 with the operation's message prefix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the operation; carries its message verbatim.
    #[error("{0}")]
    Api(String),

    /// Transport-level failure reaching the provider
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with a body we could not decode
    #[error("Failed to parse provider response: {0}")]
    Decode(String),
}

/// Request-body parse failure (strict mode).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseBodyError {
    /// `Content-Type: application/json` with a body that is not valid JSON
    #[error("Invalid JSON body")]
    InvalidJson,

    /// Form-encoded content type with an undecodable body
    #[error("Invalid form body")]
    InvalidForm,
}

/// Core error type for the HTTP contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Credential failed a sanity check before any provider call
    #[error("{0}")]
    Configuration(String),

    /// A required request field is absent
    #[error("'{name}' is a required parameter")]
    MissingParam { name: &'static str },

    /// The request body could not be parsed
    #[error(transparent)]
    InvalidBody(#[from] ParseBodyError),

    /// The provider rejected the operation; carries the full prefixed message
    #[error("{0}")]
    Provider(String),

    /// No route matched the request path
    #[error("Not found")]
    NotFound,

    /// The path exists but does not accept this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Anything unexpected; detail is logged server-side only
    #[error("Internal Server Error")]
    Internal,
}

impl BackendError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Configuration(_) => 400,
            BackendError::MissingParam { .. } => 400,
            BackendError::InvalidBody(_) => 400,
            BackendError::Provider(_) => 402,
            BackendError::NotFound => 404,
            BackendError::MethodNotAllowed => 405,
            BackendError::Internal => 500,
        }
    }
}

/// Result type alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;
