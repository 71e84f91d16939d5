//! # pos-stripe
//!
//! Stripe Terminal provider for the POS terminal backend.
//!
//! Implements [`pos_core::TerminalProvider`] against Stripe's REST API:
//! reader registration, connection tokens, the card-present PaymentIntent
//! lifecycle, SetupIntents, customer lookup, and terminal locations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pos_core::{CreatePaymentIntent, ParamsMap, TerminalProvider};
//! use pos_stripe::StripeTerminalClient;
//!
//! // Reads STRIPE_ENV / STRIPE_TEST_SECRET_KEY / STRIPE_SECRET_KEY
//! let client = StripeTerminalClient::from_env();
//!
//! let req = CreatePaymentIntent::from_params(&params);
//! let intent = client.create_payment_intent(&req).await?;
//! println!("created {}", intent.id().unwrap_or("?"));
//! ```
//!
//! The credential is validated per request by the API layer, not here: a
//! bad key still produces a working client whose calls fail with Stripe's
//! own error message.

pub mod client;
pub mod config;

// Re-exports
pub use client::StripeTerminalClient;
pub use config::{Credential, CredentialError, KeyMode, StripeConfig, STRIPE_API_VERSION};
