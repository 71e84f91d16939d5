//! Shared test support: a recording provider stub and a test server
//! around the real router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use pos_api::state::AppState;
use pos_core::{
    CreateLocation, CreatePaymentIntent, CreateSetupIntent, ProviderError, ProviderResult,
    RegisterReader, Resource, ResourceList, SharedProvider, TerminalProvider,
    UpdatePaymentIntent,
};
use pos_stripe::Credential;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A key that passes every credential check.
pub const TEST_KEY: &str = "sk_test_spy_key";

/// One recorded provider call: method name plus its arguments as JSON.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub args: Value,
}

#[derive(Default)]
struct SpyState {
    calls: Vec<RecordedCall>,
    /// Customers visible to `list_customers`.
    customers: Vec<Resource>,
    /// Locations returned by `list_locations`.
    locations: Vec<Resource>,
    /// Methods forced to fail, with the message the "provider" reports.
    failures: HashMap<&'static str, String>,
    /// Methods forced to panic mid-call.
    panics: HashMap<&'static str, String>,
    /// Canned responses per method, overriding the built-in defaults.
    responses: HashMap<&'static str, Resource>,
}

/// Recording stub standing in for the Stripe client in handler tests.
///
/// Every call is logged with its arguments; responses are either canned
/// via [`with_response`](Self::with_response) or sensible echoes of the
/// request.
pub struct SpyProvider {
    state: Mutex<SpyState>,
}

impl SpyProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SpyState::default()),
        }
    }

    pub fn with_response(self, method: &'static str, resource: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(method, Resource::new(resource));
        self
    }

    pub fn with_failure(self, method: &'static str, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(method, message.to_string());
        self
    }

    pub fn with_panic(self, method: &'static str, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .panics
            .insert(method, message.to_string());
        self
    }

    pub fn with_customer(self, customer: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .customers
            .push(Resource::new(customer));
        self
    }

    pub fn with_location(self, location: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .locations
            .push(Resource::new(location));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn first_call(&self, method: &str) -> Option<RecordedCall> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .find(|c| c.method == method)
            .cloned()
    }

    fn record(&self, method: &'static str, args: Value) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall { method, args });
        if let Some(message) = state.panics.get(method) {
            // Release the lock first so assertions after the unwind
            // still work
            let message = message.clone();
            drop(state);
            panic!("{message}");
        }
        if let Some(message) = state.failures.get(method) {
            return Err(ProviderError::Api(message.clone()));
        }
        Ok(())
    }

    fn response(&self, method: &'static str, default: Value) -> Resource {
        self.state
            .lock()
            .unwrap()
            .responses
            .get(method)
            .cloned()
            .unwrap_or_else(|| Resource::new(default))
    }
}

impl Default for SpyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TerminalProvider for SpyProvider {
    async fn create_reader(&self, req: &RegisterReader) -> ProviderResult<Resource> {
        self.record("create_reader", serde_json::to_value(req).unwrap())?;
        Ok(self.response(
            "create_reader",
            json!({
                "id": "tmr_spy_1",
                "object": "terminal.reader",
                "label": req.label.clone().unwrap_or_else(|| "Spy Reader".to_string())
            }),
        ))
    }

    async fn create_connection_token(&self) -> ProviderResult<Resource> {
        self.record("create_connection_token", json!({}))?;
        Ok(self.response(
            "create_connection_token",
            json!({
                "object": "terminal.connection_token",
                "secret": "pst_test_spy_secret"
            }),
        ))
    }

    async fn create_payment_intent(&self, req: &CreatePaymentIntent) -> ProviderResult<Resource> {
        self.record("create_payment_intent", serde_json::to_value(req).unwrap())?;
        Ok(self.response(
            "create_payment_intent",
            json!({
                "id": "pi_spy_1",
                "object": "payment_intent",
                "client_secret": "pi_spy_1_secret"
            }),
        ))
    }

    async fn capture_payment_intent(
        &self,
        payment_intent_id: &str,
        amount_to_capture: Option<&Value>,
    ) -> ProviderResult<Resource> {
        self.record(
            "capture_payment_intent",
            json!({
                "payment_intent_id": payment_intent_id,
                "amount_to_capture": amount_to_capture.cloned()
            }),
        )?;
        Ok(self.response(
            "capture_payment_intent",
            json!({
                "id": payment_intent_id,
                "object": "payment_intent",
                "client_secret": format!("{payment_intent_id}_secret")
            }),
        ))
    }

    async fn cancel_payment_intent(&self, payment_intent_id: &str) -> ProviderResult<Resource> {
        self.record(
            "cancel_payment_intent",
            json!({"payment_intent_id": payment_intent_id}),
        )?;
        Ok(self.response(
            "cancel_payment_intent",
            json!({
                "id": payment_intent_id,
                "object": "payment_intent",
                "client_secret": format!("{payment_intent_id}_secret")
            }),
        ))
    }

    async fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        req: &UpdatePaymentIntent,
    ) -> ProviderResult<Resource> {
        let fields: Map<String, Value> = req.fields.iter().cloned().collect();
        self.record(
            "update_payment_intent",
            json!({
                "payment_intent_id": payment_intent_id,
                "fields": fields
            }),
        )?;
        Ok(self.response(
            "update_payment_intent",
            json!({
                "id": payment_intent_id,
                "object": "payment_intent",
                "client_secret": format!("{payment_intent_id}_secret")
            }),
        ))
    }

    async fn create_setup_intent(&self, req: &CreateSetupIntent) -> ProviderResult<Resource> {
        self.record("create_setup_intent", serde_json::to_value(req).unwrap())?;
        Ok(self.response(
            "create_setup_intent",
            json!({
                "id": "seti_spy_1",
                "object": "setup_intent",
                "client_secret": "seti_spy_1_secret"
            }),
        ))
    }

    async fn list_customers(&self, email: &str, limit: u32) -> ProviderResult<ResourceList> {
        self.record("list_customers", json!({"email": email, "limit": limit}))?;
        let state = self.state.lock().unwrap();
        let matches: Vec<Resource> = state
            .customers
            .iter()
            .filter(|c| c.get("email").and_then(Value::as_str) == Some(email))
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(ResourceList::new(matches))
    }

    async fn create_customer(&self, email: &str) -> ProviderResult<Resource> {
        self.record("create_customer", json!({"email": email}))?;
        let mut state = self.state.lock().unwrap();
        let customer = Resource::new(json!({
            "id": format!("cus_spy_{}", state.customers.len() + 1),
            "object": "customer",
            "email": email
        }));
        state.customers.push(customer.clone());
        Ok(customer)
    }

    async fn attach_payment_method(
        &self,
        payment_method_id: &str,
        customer_id: &str,
    ) -> ProviderResult<Resource> {
        self.record(
            "attach_payment_method",
            json!({
                "payment_method_id": payment_method_id,
                "customer": customer_id
            }),
        )?;
        Ok(self.response(
            "attach_payment_method",
            json!({
                "id": payment_method_id,
                "object": "payment_method",
                "customer": {"id": customer_id, "object": "customer"}
            }),
        ))
    }

    async fn create_location(&self, req: &CreateLocation) -> ProviderResult<Resource> {
        self.record("create_location", serde_json::to_value(req).unwrap())?;
        Ok(self.response(
            "create_location",
            json!({
                "id": "tml_spy_1",
                "object": "terminal.location",
                "display_name": req.display_name.clone().unwrap_or_else(|| "Spy Location".to_string())
            }),
        ))
    }

    async fn list_locations(&self, limit: u32) -> ProviderResult<ResourceList> {
        self.record("list_locations", json!({"limit": limit}))?;
        let state = self.state.lock().unwrap();
        Ok(ResourceList::new(state.locations.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "spy"
    }
}

/// Test server over the real router, with the given key.
pub fn server_with(provider: Arc<SpyProvider>, secret_key: &str) -> TestServer {
    let state = AppState::with_provider(provider as SharedProvider, Credential::new(secret_key));
    TestServer::new(pos_api::create_router(state)).expect("failed to start test server")
}

/// Test server with a key that passes the credential gate.
pub fn server(provider: Arc<SpyProvider>) -> TestServer {
    server_with(provider, TEST_KEY)
}
