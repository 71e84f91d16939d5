//! # pos-api
//!
//! HTTP API layer for the POS terminal backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The terminal endpoints consumed by the example POS clients
//! - Uniform JSON errors and permissive CORS for browser-based clients
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Status page |
//! | POST | `/connection_token` | Mint an SDK connection token |
//! | POST | `/register_reader` | Register a hardware reader |
//! | POST | `/create_payment_intent` | Start a card-present payment |
//! | POST | `/capture_payment_intent` | Capture an authorized payment |
//! | POST | `/cancel_payment_intent` | Cancel a payment |
//! | POST | `/update_payment_intent` | Update permitted fields |
//! | POST | `/create_setup_intent` | Start saving a payment method |
//! | POST | `/attach_payment_method_to_customer` | Attach to the example customer |
//! | POST | `/create_location` | Create a terminal location |
//! | GET | `/list_locations` | List terminal locations |

pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
