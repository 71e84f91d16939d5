//! # POS Core
//!
//! Provider-agnostic domain layer for the terminal backend:
//!
//! - [`error`] - error taxonomy with HTTP status mapping
//! - [`params`] - content-type driven request body normalization
//! - [`request`] - typed operation payloads and their defaulting rules
//! - [`resource`] - opaque provider objects and lists
//! - [`provider`] - the [`TerminalProvider`] trait seam
//!
//! Nothing in this crate touches HTTP or the network.

pub mod error;
pub mod params;
pub mod provider;
pub mod request;
pub mod resource;

pub use error::{BackendError, ParseBodyError, ProviderError, ProviderResult};
pub use params::{parse_body, ParamsMap};
pub use provider::{SharedProvider, TerminalProvider};
pub use request::{
    CreateLocation, CreatePaymentIntent, CreateSetupIntent, RegisterReader, UpdatePaymentIntent,
    DEFAULT_CAPTURE_METHOD, DEFAULT_CURRENCY, DEFAULT_DESCRIPTION, DEFAULT_PAYMENT_METHOD_TYPE,
    UPDATE_ALLOWED_FIELDS,
};
pub use resource::{Resource, ResourceList};
