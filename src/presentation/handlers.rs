// HTTP request handlers
use crate::application::session_service::DashboardSnapshot;
use crate::domain::preset::ScenarioPreset;
use crate::domain::telemetry::{TelemetryField, TelemetryReading};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TelemetryUpdate {
    pub field: TelemetryField,
    pub value: f64,
}

#[derive(Serialize)]
pub struct AudioStatus {
    pub audio_enabled: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard snapshot: reading, assessment, and derived display state
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.session.snapshot().await)
}

/// Set one telemetry field. Values are clamped to the field's slider range
/// here; the domain model accepts whatever this boundary hands it. Editing
/// a field never triggers a scan.
pub async fn set_telemetry(
    State(state): State<Arc<AppState>>,
    Json(update): Json<TelemetryUpdate>,
) -> Result<Json<TelemetryReading>, (StatusCode, String)> {
    if !update.value.is_finite() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "telemetry value must be finite".to_string(),
        ));
    }
    let (min, max) = update.field.range();
    let reading = state
        .session
        .set_field(update.field, update.value.clamp(min, max))
        .await;
    Ok(Json(reading))
}

/// Manual "scan now": run one analysis pass and return the refreshed state
pub async fn trigger_scan(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    state.session.trigger_scan().await;
    Json(state.session.snapshot().await)
}

/// Apply a scenario preset; this overwrites the reading and runs one scan
pub async fn apply_preset(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, (StatusCode, String)> {
    let preset: ScenarioPreset = name
        .parse()
        .map_err(|e: anyhow::Error| (StatusCode::BAD_REQUEST, e.to_string()))?;
    state.session.apply_preset(preset).await;
    Ok(Json(state.session.snapshot().await))
}

/// Toggle the audible-alert flag
pub async fn toggle_audio(State(state): State<Arc<AppState>>) -> Json<AudioStatus> {
    let audio_enabled = state.session.toggle_audio().await;
    Json(AudioStatus { audio_enabled })
}
