//! # Request Handlers
//!
//! Axum request handlers for the terminal backend.
//! Every operation runs the same pipeline: normalize the body, check
//! required fields, gate on the credential, make exactly one provider
//! call, and map any failure onto the operation's fixed message prefix.

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use pos_core::{
    BackendError, CreateLocation, CreatePaymentIntent, CreateSetupIntent, ParamsMap,
    RegisterReader, Resource, TerminalProvider, UpdatePaymentIntent,
};
use tracing::{error, info, instrument, warn};

use crate::extract::Params;
use crate::response::{ApiError, ConnectionTokenSummary, IntentSummary};
use crate::state::AppState;

/// Setup and attach flows all reuse one well-known customer instead of
/// growing a new customer per run.
pub const EXAMPLE_CUSTOMER_EMAIL: &str = "example@test.com";

const CUSTOMER_LOOKUP_LIMIT: u32 = 1;
const LOCATION_LIST_LIMIT: u32 = 100;

// =============================================================================
// Shared helpers
// =============================================================================

/// Credential gate: nothing reaches the provider with an unusable key.
fn credential_gate(state: &AppState) -> Result<(), ApiError> {
    state.check_credential().map_err(|e| {
        warn!("{e}");
        ApiError(e)
    })
}

fn require(params: &ParamsMap, name: &'static str) -> Result<String, ApiError> {
    params.required_str(name).map_err(|e| {
        warn!("{e}");
        ApiError(e)
    })
}

/// Wraps a provider failure in its operation prefix; the combined
/// message is both logged and returned to the client.
fn provider_failure(message: String) -> ApiError {
    error!("{message}");
    ApiError(BackendError::Provider(message))
}

/// Best-effort singleton: look the example customer up by email, create
/// it when absent. Two racing first-time requests can both create one;
/// harmless for an example backend, so no locking.
async fn lookup_or_create_example_customer(
    provider: &dyn TerminalProvider,
) -> Result<Resource, ApiError> {
    let mut matches = provider
        .list_customers(EXAMPLE_CUSTOMER_EMAIL, CUSTOMER_LOOKUP_LIMIT)
        .await
        .map_err(customer_failure)?
        .data;

    if matches.len() == 1 {
        if let Some(existing) = matches.pop() {
            return Ok(existing);
        }
    }

    provider
        .create_customer(EXAMPLE_CUSTOMER_EMAIL)
        .await
        .map_err(customer_failure)
}

fn customer_failure(err: pos_core::ProviderError) -> ApiError {
    provider_failure(format!("Error creating or retrieving customer! {err}"))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET / - static page confirming the backend is up
pub async fn index() -> impl IntoResponse {
    Html(INDEX_PAGE)
}

/// POST /register_reader - register a hardware reader to a location
#[instrument(skip(state, params))]
pub async fn register_reader(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Resource>, ApiError> {
    credential_gate(&state)?;

    let req = RegisterReader::from_params(&params);
    let reader = state
        .provider
        .create_reader(&req)
        .await
        .map_err(|e| provider_failure(format!("Error registering reader! {e}")))?;

    info!("Reader registered: {}", reader.id().unwrap_or_default());
    Ok(Json(reader))
}

/// POST /connection_token - mint a short-lived SDK connection token
#[instrument(skip_all)]
pub async fn connection_token(
    State(state): State<AppState>,
    Params(_params): Params,
) -> Result<Json<ConnectionTokenSummary>, ApiError> {
    credential_gate(&state)?;

    let token = state
        .provider
        .create_connection_token()
        .await
        .map_err(|e| provider_failure(format!("Error creating ConnectionToken! {e}")))?;

    Ok(Json(ConnectionTokenSummary::from_resource(&token)))
}

/// POST /create_payment_intent - start a card-present payment
#[instrument(skip(state, params))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<IntentSummary>, ApiError> {
    credential_gate(&state)?;

    let req = CreatePaymentIntent::from_params(&params);
    let intent = state
        .provider
        .create_payment_intent(&req)
        .await
        .map_err(|e| provider_failure(format!("Error creating PaymentIntent! {e}")))?;

    info!(
        "PaymentIntent successfully created: {}",
        intent.id().unwrap_or_default()
    );
    Ok(Json(IntentSummary::from_resource(&intent)))
}

/// POST /capture_payment_intent - capture an authorized payment
#[instrument(skip(state, params))]
pub async fn capture_payment_intent(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<IntentSummary>, ApiError> {
    let payment_intent_id = require(&params, "payment_intent_id")?;
    credential_gate(&state)?;

    let amount_to_capture = params
        .get("amount_to_capture")
        .filter(|v| !v.is_null())
        .cloned();

    let intent = state
        .provider
        .capture_payment_intent(&payment_intent_id, amount_to_capture.as_ref())
        .await
        .map_err(|e| provider_failure(format!("Error capturing PaymentIntent! {e}")))?;

    info!(
        "PaymentIntent successfully captured: {}",
        intent.id().unwrap_or_default()
    );
    Ok(Json(IntentSummary::from_resource(&intent)))
}

/// POST /cancel_payment_intent - cancel a payment before capture
#[instrument(skip(state, params))]
pub async fn cancel_payment_intent(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<IntentSummary>, ApiError> {
    let payment_intent_id = require(&params, "payment_intent_id")?;
    credential_gate(&state)?;

    let intent = state
        .provider
        .cancel_payment_intent(&payment_intent_id)
        .await
        .map_err(|e| provider_failure(format!("Error canceling PaymentIntent! {e}")))?;

    info!(
        "PaymentIntent successfully canceled: {}",
        intent.id().unwrap_or_default()
    );
    Ok(Json(IntentSummary::from_resource(&intent)))
}

/// POST /update_payment_intent - change permitted fields on a payment
#[instrument(skip(state, params))]
pub async fn update_payment_intent(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<IntentSummary>, ApiError> {
    let payment_intent_id = require(&params, "payment_intent_id")?;
    credential_gate(&state)?;

    let req = UpdatePaymentIntent::from_params(&params);
    let intent = state
        .provider
        .update_payment_intent(&payment_intent_id, &req)
        .await
        .map_err(|e| {
            provider_failure(format!("Error updating PaymentIntent {payment_intent_id}. {e}"))
        })?;

    info!("Updated PaymentIntent {}", intent.id().unwrap_or_default());
    Ok(Json(IntentSummary::from_resource(&intent)))
}

/// POST /create_setup_intent - start saving a card-present payment method
#[instrument(skip(state, params))]
pub async fn create_setup_intent(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<IntentSummary>, ApiError> {
    credential_gate(&state)?;

    let req = CreateSetupIntent::from_params(&params);
    let intent = state
        .provider
        .create_setup_intent(&req)
        .await
        .map_err(|e| provider_failure(format!("Error creating SetupIntent! {e}")))?;

    info!(
        "SetupIntent successfully created: {}",
        intent.id().unwrap_or_default()
    );
    Ok(Json(IntentSummary::from_resource(&intent)))
}

/// POST /attach_payment_method_to_customer - attach a saved payment
/// method to the example customer, creating the customer on first use
#[instrument(skip(state, params))]
pub async fn attach_payment_method_to_customer(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Resource>, ApiError> {
    let payment_method_id = require(&params, "payment_method_id")?;
    credential_gate(&state)?;

    let customer = lookup_or_create_example_customer(state.provider.as_ref()).await?;
    let customer_id = customer.id().unwrap_or_default().to_string();

    let payment_method = state
        .provider
        .attach_payment_method(&payment_method_id, &customer_id)
        .await
        .map_err(|e| {
            provider_failure(format!("Error attaching PaymentMethod to Customer! {e}"))
        })?;

    info!("Attached PaymentMethod to Customer: {customer_id}");
    Ok(Json(payment_method))
}

/// POST /create_location - create a terminal location
#[instrument(skip(state, params))]
pub async fn create_location(
    State(state): State<AppState>,
    Params(params): Params,
) -> Result<Json<Resource>, ApiError> {
    credential_gate(&state)?;

    let req = CreateLocation::from_params(&params);
    let location = state
        .provider
        .create_location(&req)
        .await
        .map_err(|e| provider_failure(format!("Error creating Location! {e}")))?;

    info!(
        "Location successfully created: {}",
        location.id().unwrap_or_default()
    );
    Ok(Json(location))
}

/// GET /list_locations - list terminal locations
#[instrument(skip_all)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    credential_gate(&state)?;

    let locations = state
        .provider
        .list_locations(LOCATION_LIST_LIMIT)
        .await
        .map_err(|e| provider_failure(format!("Error fetching Locations! {e}")))?;

    info!("{} Locations successfully fetched", locations.len());
    Ok(Json(locations.data))
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>POS Terminal Backend</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">🖥️</div>
        <h1>Terminal backend is running</h1>
        <p style="color: #666;">Point the POS app at this URL to mint connection tokens and take payments.</p>
    </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failure_is_402_with_full_message() {
        let err = provider_failure("Error creating PaymentIntent! declined".to_string());
        assert_eq!(err.0.status_code(), 402);
        assert_eq!(err.0.to_string(), "Error creating PaymentIntent! declined");
    }

    #[test]
    fn test_require_reports_the_field_name() {
        let err = require(&ParamsMap::new(), "payment_intent_id").unwrap_err();
        assert_eq!(err.0.status_code(), 400);
        assert_eq!(
            err.0.to_string(),
            "'payment_intent_id' is a required parameter"
        );
    }

    #[test]
    fn test_customer_failure_prefix() {
        let err = customer_failure(pos_core::ProviderError::Api("boom".to_string()));
        assert_eq!(
            err.0.to_string(),
            "Error creating or retrieving customer! boom"
        );
    }
}
