//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the terminal provider, the credential for per-request checks,
//! and server configuration.

use pos_core::{BackendError, SharedProvider};
use pos_stripe::{Credential, StripeConfig, StripeTerminalClient};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4567),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Terminal provider backing every operation
    pub provider: SharedProvider,
    /// Secret key, re-checked on each request
    pub credential: Credential,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Stripe terminal client.
    ///
    /// Infallible on purpose: an unset or unusable key still yields a
    /// running server whose requests all answer with key guidance.
    pub fn new() -> Self {
        let config = AppConfig::from_env();
        let stripe = StripeConfig::from_env();
        let credential = stripe.credential.clone();
        let provider: SharedProvider = Arc::new(StripeTerminalClient::new(stripe));

        Self {
            provider,
            credential,
            config,
        }
    }

    /// Create state around an explicit provider (used by tests)
    pub fn with_provider(provider: SharedProvider, credential: Credential) -> Self {
        Self {
            provider,
            credential,
            config: AppConfig::from_env(),
        }
    }

    /// Credential gate shared by every operation: nothing reaches the
    /// provider while the configured key is unusable.
    pub fn check_credential(&self) -> Result<(), BackendError> {
        self.credential
            .validate()
            .map_err(|e| BackendError::Configuration(e.to_string()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
