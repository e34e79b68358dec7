// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::analysis::Geolocator;
use crate::application::session_service::SessionService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::gemini_client::GeminiClient;
use crate::infrastructure::geolocation::IpGeolocator;
use crate::infrastructure::speech::ConsoleAnnouncer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    apply_preset, get_dashboard, health_check, set_telemetry, toggle_audio, trigger_scan,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let app_config = load_config()?;

    // Create adapters (infrastructure layer)
    let analyzer = Arc::new(GeminiClient::new(
        app_config.gemini.base_url,
        app_config.gemini.model,
        app_config.gemini.api_key,
    ));
    let speech = Arc::new(ConsoleAnnouncer);

    // Create session service (application layer)
    let session = SessionService::new(analyzer, speech);

    // One-shot geolocation at startup; failure leaves coordinates absent
    if app_config.geolocation.enabled {
        let geolocator = IpGeolocator::new(app_config.geolocation.endpoint);
        if let Some(fix) = geolocator.locate().await {
            tracing::info!(
                latitude = fix.latitude,
                longitude = fix.longitude,
                "acquired GPS fix"
            );
            session.set_coordinates(fix).await;
        }
    }

    // Create application state
    let state = Arc::new(AppState { session });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/telemetry", put(set_telemetry))
        .route("/scan", post(trigger_scan))
        .route("/presets/:name", post(apply_preset))
        .route("/audio", post(toggle_audio))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind.parse()?;
    tracing::info!("Starting sentinel-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
