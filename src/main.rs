//! Study advisor - a staged study-coaching chatbot
//!
//! Collects a subject and a self-assessed level, then answers coaching
//! messages with fixed templates or an LLM, over a small JSON API.

mod api;
mod config;
mod controller;
mod llm;
mod reply;
mod runtime;
mod state_machine;
mod system_prompt;

use api::{create_router, AppState};
use config::AdvisorConfig;
use controller::DialogueController;
use llm::ModelRegistry;
use runtime::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_advisor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AdvisorConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;

    // Initialize LLM registry
    let llm_registry = Arc::new(ModelRegistry::new(&config.llm));
    if llm_registry.has_models() {
        tracing::info!(
            models = ?llm_registry.available_models(),
            default = ?llm_registry.default_model_id(),
            "LLM registry initialized"
        );
    } else {
        tracing::info!("No LLM credentials configured");
    }

    let generator = config.build_generator(&llm_registry).map_err(|e| {
        tracing::error!(error = %e, "Cannot start reply generator");
        e
    })?;
    tracing::info!(
        strategy = generator.name(),
        model = ?generator.model_id(),
        history_window = config.history_window,
        safety_notice = config.safety_notice,
        "Reply generator ready"
    );

    // Create application state
    let sessions = SessionManager::new(DialogueController::new(generator));
    let state = AppState::new(sessions, llm_registry);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Study advisor listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
