//! # Terminal Provider Abstraction
//!
//! Trait seam between the HTTP surface and the payments provider. Handlers
//! depend on [`TerminalProvider`] only, so tests swap in a recording stub
//! and the HTTP contract is exercised without network access.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::request::{
    CreateLocation, CreatePaymentIntent, CreateSetupIntent, RegisterReader, UpdatePaymentIntent,
};
use crate::resource::{Resource, ResourceList};

/// Provider operations backing the terminal endpoints.
///
/// Every method performs exactly one provider call; retries and idempotency
/// are the caller's concern (and the backend deliberately does neither).
#[async_trait]
pub trait TerminalProvider: Send + Sync {
    /// Registers a hardware reader from its on-screen registration code.
    async fn create_reader(&self, req: &RegisterReader) -> ProviderResult<Resource>;

    /// Mints a short-lived connection token for SDK discovery/connection.
    async fn create_connection_token(&self) -> ProviderResult<Resource>;

    async fn create_payment_intent(&self, req: &CreatePaymentIntent) -> ProviderResult<Resource>;

    /// Captures a previously authorized PaymentIntent, optionally for a
    /// partial `amount_to_capture`.
    async fn capture_payment_intent(
        &self,
        payment_intent_id: &str,
        amount_to_capture: Option<&Value>,
    ) -> ProviderResult<Resource>;

    async fn cancel_payment_intent(&self, payment_intent_id: &str) -> ProviderResult<Resource>;

    async fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        req: &UpdatePaymentIntent,
    ) -> ProviderResult<Resource>;

    async fn create_setup_intent(&self, req: &CreateSetupIntent) -> ProviderResult<Resource>;

    /// Looks up customers by exact email, newest first.
    async fn list_customers(&self, email: &str, limit: u32) -> ProviderResult<ResourceList>;

    async fn create_customer(&self, email: &str) -> ProviderResult<Resource>;

    /// Attaches a payment method to a customer, returning the payment
    /// method with its customer expanded.
    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> ProviderResult<Resource>;

    async fn create_location(&self, req: &CreateLocation) -> ProviderResult<Resource>;

    async fn list_locations(&self, limit: u32) -> ProviderResult<ResourceList>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}

/// Shared, object-safe provider handle used across handlers.
pub type SharedProvider = Arc<dyn TerminalProvider>;
