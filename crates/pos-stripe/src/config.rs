//! # Stripe Configuration
//!
//! Environment-driven configuration for the Stripe Terminal client.
//!
//! A missing or malformed secret key is deliberately NOT a startup error:
//! the server boots regardless and each request re-checks the credential,
//! so a misconfigured setup answers every call with the same guidance
//! instead of refusing to start.

use std::env;
use std::fmt;

use thiserror::Error;

/// Pinned Stripe API version, matching the SDK feature set the POS
/// client expects.
pub const STRIPE_API_VERSION: &str = "2020-03-02";

/// Credential sanity-check failures, each carrying the exact guidance
/// shown to the client.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Error: you provided an empty secret key. Please provide your test mode secret key. For more information, see https://stripe.com/docs/keys")]
    Empty,

    #[error("Error: you used a publishable key to set up the example backend. Please use your test mode secret key. For more information, see https://stripe.com/docs/keys")]
    Publishable,

    #[error("Error: you used a live mode secret key to set up the example backend. Please use your test mode secret key. For more information, see https://stripe.com/docs/keys#test-live-modes")]
    LiveMode,
}

/// Key mode inferred from the secret-key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Test,
    Live,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Test => f.write_str("test"),
            KeyMode::Live => f.write_str("live"),
        }
    }
}

/// A Stripe secret key.
///
/// `Debug` shows only the prefix; the full key never reaches logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full key, for the Authorization header only.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn mode(&self) -> KeyMode {
        if self.0.trim().starts_with("sk_live") {
            KeyMode::Live
        } else {
            KeyMode::Test
        }
    }

    /// Publishable keys (`pk_...`) belong in the client, not here.
    pub fn looks_publishable(&self) -> bool {
        self.0.trim().starts_with("pk")
    }

    /// Checks the key is usable for a test-mode example backend.
    ///
    /// Order matters: an empty key wins over prefix checks, and the
    /// publishable check runs before the live-mode check, so `pk_live_...`
    /// reports the publishable-key guidance.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.is_empty() {
            return Err(CredentialError::Empty);
        }
        if self.looks_publishable() {
            return Err(CredentialError::Publishable);
        }
        if self.mode() == KeyMode::Live {
            return Err(CredentialError::LiveMode);
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("Credential(<empty>)");
        }
        let prefix: String = self.0.chars().take(7).collect();
        write!(f, "Credential({prefix}…)")
    }
}

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key, possibly empty until the operator sets one
    pub credential: Credential,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Pinned API version sent with every request
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// `STRIPE_ENV=production` selects `STRIPE_SECRET_KEY`; anything else
    /// selects `STRIPE_TEST_SECRET_KEY`. An unset variable yields an empty
    /// credential rather than an error.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let var_name = if env::var("STRIPE_ENV").as_deref() == Ok("production") {
            "STRIPE_SECRET_KEY"
        } else {
            "STRIPE_TEST_SECRET_KEY"
        };
        let raw = env::var(var_name).unwrap_or_default();

        Self {
            credential: Credential::new(raw),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: STRIPE_API_VERSION.to_string(),
        }
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(secret_key),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: STRIPE_API_VERSION.to_string(),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.credential.as_str())
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}
