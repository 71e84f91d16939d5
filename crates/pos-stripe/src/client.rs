//! # Stripe Terminal Client
//!
//! [`TerminalProvider`] implementation over Stripe's REST API.
//!
//! Stripe takes form-encoded bodies with bracket notation for nested keys
//! (`payment_method_types[0]=card_present`, `address[line1]=...`), so every
//! request is flattened into `(key, value)` pairs before it goes out.

use async_trait::async_trait;
use pos_core::{
    CreateLocation, CreatePaymentIntent, CreateSetupIntent, ProviderError, ProviderResult,
    RegisterReader, Resource, ResourceList, TerminalProvider, UpdatePaymentIntent,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::config::StripeConfig;

/// Stripe-backed terminal provider.
pub struct StripeTerminalClient {
    config: StripeConfig,
    client: Client,
}

impl StripeTerminalClient {
    /// Create a new Stripe terminal client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(StripeConfig::from_env())
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(form)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> ProviderResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Surface Stripe's own message verbatim when the body carries one
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(ProviderError::Api(error_response.error.message));
            }

            return Err(ProviderError::Api(format!("HTTP {}: {}", status, body)));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Flattens a JSON value into Stripe's bracketed form keys.
///
/// Arrays become `key[0]`, `key[1]`, ... and objects become `key[field]`,
/// recursively. Nulls are dropped.
fn append_form(form: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => form.push((key.to_string(), s.clone())),
        Value::Number(n) => form.push((key.to_string(), n.to_string())),
        Value::Bool(b) => form.push((key.to_string(), b.to_string())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                append_form(form, &format!("{key}[{i}]"), item);
            }
        }
        Value::Object(map) => {
            for (nested_key, nested_value) in map {
                append_form(form, &format!("{key}[{nested_key}]"), nested_value);
            }
        }
    }
}

fn push_opt(form: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        form.push((key.to_string(), v.clone()));
    }
}

#[async_trait]
impl TerminalProvider for StripeTerminalClient {
    #[instrument(skip(self, req))]
    async fn create_reader(&self, req: &RegisterReader) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        push_opt(&mut form, "registration_code", &req.registration_code);
        push_opt(&mut form, "label", &req.label);
        push_opt(&mut form, "location", &req.location);

        let reader: Resource = self.post_form("/v1/terminal/readers", &form).await?;
        debug!("Registered terminal reader: {:?}", reader.id());
        Ok(reader)
    }

    #[instrument(skip(self))]
    async fn create_connection_token(&self) -> ProviderResult<Resource> {
        self.post_form("/v1/terminal/connection_tokens", &[]).await
    }

    #[instrument(skip(self, req))]
    async fn create_payment_intent(&self, req: &CreatePaymentIntent) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        for (i, method_type) in req.payment_method_types.iter().enumerate() {
            form.push((format!("payment_method_types[{i}]"), method_type.clone()));
        }
        form.push(("capture_method".to_string(), req.capture_method.clone()));
        if let Some(ref amount) = req.amount {
            append_form(&mut form, "amount", amount);
        }
        form.push(("currency".to_string(), req.currency.clone()));
        form.push(("description".to_string(), req.description.clone()));
        if let Some(ref options) = req.payment_method_options {
            append_form(&mut form, "payment_method_options", options);
        }
        push_opt(&mut form, "receipt_email", &req.receipt_email);

        debug!(
            "Creating PaymentIntent: {} payment method type(s), capture_method={}",
            req.payment_method_types.len(),
            req.capture_method
        );

        self.post_form("/v1/payment_intents", &form).await
    }

    #[instrument(skip(self, amount_to_capture))]
    async fn capture_payment_intent(
        &self,
        payment_intent_id: &str,
        amount_to_capture: Option<&Value>,
    ) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        if let Some(amount) = amount_to_capture {
            append_form(&mut form, "amount_to_capture", amount);
        }

        let path = format!("/v1/payment_intents/{payment_intent_id}/capture");
        self.post_form(&path, &form).await
    }

    #[instrument(skip(self))]
    async fn cancel_payment_intent(&self, payment_intent_id: &str) -> ProviderResult<Resource> {
        let path = format!("/v1/payment_intents/{payment_intent_id}/cancel");
        self.post_form(&path, &[]).await
    }

    #[instrument(skip(self, req))]
    async fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        req: &UpdatePaymentIntent,
    ) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        for (field, value) in &req.fields {
            append_form(&mut form, field, value);
        }

        let path = format!("/v1/payment_intents/{payment_intent_id}");
        self.post_form(&path, &form).await
    }

    #[instrument(skip(self, req))]
    async fn create_setup_intent(&self, req: &CreateSetupIntent) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        for (i, method_type) in req.payment_method_types.iter().enumerate() {
            form.push((format!("payment_method_types[{i}]"), method_type.clone()));
        }
        push_opt(&mut form, "customer", &req.customer);
        push_opt(&mut form, "description", &req.description);
        push_opt(&mut form, "on_behalf_of", &req.on_behalf_of);

        self.post_form("/v1/setup_intents", &form).await
    }

    #[instrument(skip(self))]
    async fn list_customers(&self, email: &str, limit: u32) -> ProviderResult<ResourceList> {
        let query = [
            ("email", email.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_query("/v1/customers", &query).await
    }

    #[instrument(skip(self))]
    async fn create_customer(&self, email: &str) -> ProviderResult<Resource> {
        let form = vec![("email".to_string(), email.to_string())];
        self.post_form("/v1/customers", &form).await
    }

    #[instrument(skip(self))]
    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> ProviderResult<Resource> {
        // expand[0]=customer so the response carries the full customer object
        let form = vec![
            ("customer".to_string(), customer_id.to_string()),
            ("expand[0]".to_string(), "customer".to_string()),
        ];

        let path = format!("/v1/payment_methods/{payment_method_id}/attach");
        self.post_form(&path, &form).await
    }

    #[instrument(skip(self, req))]
    async fn create_location(&self, req: &CreateLocation) -> ProviderResult<Resource> {
        let mut form: Vec<(String, String)> = Vec::new();
        push_opt(&mut form, "display_name", &req.display_name);
        if let Some(ref address) = req.address {
            append_form(&mut form, "address", address);
        }

        self.post_form("/v1/terminal/locations", &form).await
    }

    #[instrument(skip(self))]
    async fn list_locations(&self, limit: u32) -> ProviderResult<ResourceList> {
        let query = [("limit", limit.to_string())];
        self.get_query("/v1/terminal/locations", &query).await
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeApiError,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}
