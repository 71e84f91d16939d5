//! Typed provider-operation requests.
//!
//! Each struct is built from a [`ParamsMap`] and owns the defaulting rules
//! for its operation, so handlers stay a thin parse/gate/forward pipeline.

use serde::Serialize;
use serde_json::Value;

use crate::params::ParamsMap;

/// Default payment method for an in-person terminal flow.
pub const DEFAULT_PAYMENT_METHOD_TYPE: &str = "card_present";

/// Card-present flows capture after the card is read, not on creation.
pub const DEFAULT_CAPTURE_METHOD: &str = "manual";

pub const DEFAULT_CURRENCY: &str = "usd";

pub const DEFAULT_DESCRIPTION: &str = "Example PaymentIntent";

/// Fields a client may change on an existing PaymentIntent. Everything
/// else in the request body is dropped before the provider call.
pub const UPDATE_ALLOWED_FIELDS: &[&str] = &["receipt_email"];

/// Registers a physical reader under a terminal location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterReader {
    pub registration_code: Option<String>,
    pub label: Option<String>,
    pub location: Option<String>,
}

impl RegisterReader {
    pub fn from_params(params: &ParamsMap) -> Self {
        Self {
            registration_code: params.text("registration_code"),
            label: params.text("label"),
            location: params.text("location"),
        }
    }
}

/// Creates a PaymentIntent set up for a card-present capture flow.
///
/// `amount` passes through untouched; the provider owns amount validation
/// and its message reaches the client verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePaymentIntent {
    pub amount: Option<Value>,
    pub currency: String,
    pub description: String,
    pub payment_method_types: Vec<String>,
    pub capture_method: String,
    pub payment_method_options: Option<Value>,
    pub receipt_email: Option<String>,
}

impl CreatePaymentIntent {
    pub fn from_params(params: &ParamsMap) -> Self {
        Self {
            amount: params.get("amount").filter(|v| !v.is_null()).cloned(),
            currency: params
                .text("currency")
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            description: params
                .text("description")
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            payment_method_types: params
                .string_list("payment_method_types")
                .unwrap_or_else(|| vec![DEFAULT_PAYMENT_METHOD_TYPE.to_string()]),
            capture_method: params
                .text("capture_method")
                .unwrap_or_else(|| DEFAULT_CAPTURE_METHOD.to_string()),
            payment_method_options: params
                .get("payment_method_options")
                .filter(|v| !v.is_null())
                .cloned(),
            receipt_email: params.text("receipt_email"),
        }
    }
}

/// Creates a SetupIntent for saving a card-present payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSetupIntent {
    pub payment_method_types: Vec<String>,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub on_behalf_of: Option<String>,
}

impl CreateSetupIntent {
    pub fn from_params(params: &ParamsMap) -> Self {
        Self {
            payment_method_types: params
                .string_list("payment_method_types")
                .unwrap_or_else(|| vec![DEFAULT_PAYMENT_METHOD_TYPE.to_string()]),
            customer: params.text("customer"),
            description: params.text("description"),
            on_behalf_of: params.text("on_behalf_of"),
        }
    }
}

/// Allow-listed update to an existing PaymentIntent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePaymentIntent {
    /// Permitted `(field, value)` pairs in allow-list order.
    pub fields: Vec<(String, Value)>,
}

impl UpdatePaymentIntent {
    pub fn from_params(params: &ParamsMap) -> Self {
        let fields = UPDATE_ALLOWED_FIELDS
            .iter()
            .filter_map(|&name| {
                params
                    .get(name)
                    .filter(|v| !v.is_null())
                    .map(|v| (name.to_string(), v.clone()))
            })
            .collect();
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Creates a terminal location; `address` is forwarded as a nested object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateLocation {
    pub display_name: Option<String>,
    pub address: Option<Value>,
}

impl CreateLocation {
    pub fn from_params(params: &ParamsMap) -> Self {
        Self {
            display_name: params.text("display_name"),
            address: params.get("address").filter(|v| !v.is_null()).cloned(),
        }
    }
}
