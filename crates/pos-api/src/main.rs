//! # POS Terminal Backend
//!
//! Example backend for Stripe Terminal POS clients.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_TEST_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! pos-terminal
//! ```

use pos_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new();

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());
    info!("Stripe key mode: {}", state.credential.mode());
    if let Err(e) = state.credential.validate() {
        // The server still starts; every request answers with this guidance
        warn!("{e}");
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 POS terminal backend starting on http://{}", addr);

    if !is_prod {
        info!("💳 Connection tokens: POST http://{}/connection_token", addr);
        info!("🧾 Payments: POST http://{}/create_payment_intent", addr);
        info!("📍 Locations: GET http://{}/list_locations", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🖥️  POS Terminal Backend
  ━━━━━━━━━━━━━━━━━━━━━━━━
  Stripe Terminal example server
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
