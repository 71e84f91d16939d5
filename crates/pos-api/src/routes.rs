//! # Routes
//!
//! Axum router for the terminal backend.
//!
//! The route table is closed: the ten POS operations plus the index page.
//! Unknown paths answer a JSON 404, known paths with the wrong method a
//! JSON 405, and the CORS layer short-circuits every OPTIONS request
//! before routing.

use axum::body::Bytes;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::Full;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::response::ErrorBody;
use crate::state::AppState;

/// Create the main application router
///
/// Routes:
/// - GET  /                                   - Status page
/// - POST /connection_token                   - Mint an SDK connection token
/// - POST /register_reader                    - Register a hardware reader
/// - POST /create_payment_intent              - Start a card-present payment
/// - POST /capture_payment_intent             - Capture an authorized payment
/// - POST /cancel_payment_intent              - Cancel a payment
/// - POST /update_payment_intent              - Update permitted fields
/// - POST /create_setup_intent                - Start saving a payment method
/// - POST /attach_payment_method_to_customer  - Attach to the example customer
/// - POST /create_location                    - Create a terminal location
/// - GET  /list_locations                     - List terminal locations
pub fn create_router(state: AppState) -> Router {
    // CORS configuration mirrors what the POS clients send: browser-based
    // ones preflight with Authorization and the X-* identity headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-user-email"),
            HeaderName::from_static("x-auth-token"),
        ]);

    Router::new()
        .route("/", get(handlers::index).fallback(method_not_allowed))
        .route(
            "/connection_token",
            post(handlers::connection_token).fallback(method_not_allowed),
        )
        .route(
            "/register_reader",
            post(handlers::register_reader).fallback(method_not_allowed),
        )
        .route(
            "/create_payment_intent",
            post(handlers::create_payment_intent).fallback(method_not_allowed),
        )
        .route(
            "/capture_payment_intent",
            post(handlers::capture_payment_intent).fallback(method_not_allowed),
        )
        .route(
            "/cancel_payment_intent",
            post(handlers::cancel_payment_intent).fallback(method_not_allowed),
        )
        .route(
            "/update_payment_intent",
            post(handlers::update_payment_intent).fallback(method_not_allowed),
        )
        .route(
            "/create_setup_intent",
            post(handlers::create_setup_intent).fallback(method_not_allowed),
        )
        .route(
            "/attach_payment_method_to_customer",
            post(handlers::attach_payment_method_to_customer).fallback(method_not_allowed),
        )
        .route(
            "/create_location",
            post(handlers::create_location).fallback(method_not_allowed),
        )
        .route(
            "/list_locations",
            get(handlers::list_locations).fallback(method_not_allowed),
        )
        // Everything else
        .fallback(not_found)
        // Middleware: the panic guard sits inside CORS, so even a
        // caught-panic 500 goes out with the CORS header
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// Unknown path
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found")))
}

/// Known path, unsupported method
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Converts a handler panic into the generic JSON 500; the panic detail
/// stays in the server log.
fn handle_panic(
    err: Box<dyn std::any::Any + Send + 'static>,
) -> axum::http::Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("handler panicked: {detail}");

    axum::http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::from(r#"{"error":"Internal Server Error"}"#))
        .expect("valid response")
}
