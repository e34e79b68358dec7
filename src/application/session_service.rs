// Session service - Application state and scan orchestration

use crate::application::analysis::{RiskAnalyzer, SpeechSynthesizer};
use crate::domain::assessment::RiskAssessment;
use crate::domain::display::{
    GaugeStatus, MapMarker, RouteStepView, place_markers, route_step_views, sos_visible,
};
use crate::domain::preset::ScenarioPreset;
use crate::domain::telemetry::{Coordinates, TelemetryField, TelemetryReading};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A scan is audible when the operator enabled audio, the model raised at
/// least one alert, and the risk level is above this threshold.
const AUDIBLE_RISK_THRESHOLD: u8 = 60;

/// Everything the dashboard renders, derived from one consistent read of the
/// session state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub reading: TelemetryReading,
    pub assessment: RiskAssessment,
    pub gauge_status: GaugeStatus,
    pub gauge_color: &'static str,
    pub sos_visible: bool,
    pub route_steps: Vec<RouteStepView>,
    pub map_markers: Vec<MapMarker>,
    pub scanning: bool,
    pub audio_enabled: bool,
    pub last_scan: DateTime<Utc>,
}

struct SessionState {
    reading: TelemetryReading,
    assessment: RiskAssessment,
    // Count, not a flag: overlapping scans are neither queued nor cancelled,
    // so the session is "scanning" until every pass has completed.
    scans_in_flight: usize,
    audio_enabled: bool,
    last_scan: DateTime<Utc>,
}

/// The single mutable record of the session. All transitions run on the
/// event path of one handler at a time; overlapping scans are not queued or
/// cancelled, the later completion simply overwrites the earlier one.
#[derive(Clone)]
pub struct SessionService {
    analyzer: Arc<dyn RiskAnalyzer>,
    speech: Arc<dyn SpeechSynthesizer>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionService {
    pub fn new(analyzer: Arc<dyn RiskAnalyzer>, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            analyzer,
            speech,
            state: Arc::new(RwLock::new(SessionState {
                reading: TelemetryReading::default(),
                assessment: RiskAssessment::initial(),
                scans_in_flight: 0,
                audio_enabled: false,
                last_scan: Utc::now(),
            })),
        }
    }

    /// Merge the startup geolocation result into the reading.
    pub async fn set_coordinates(&self, coordinates: Coordinates) {
        let mut state = self.state.write().await;
        state.reading.coordinates = Some(coordinates);
    }

    /// Set one telemetry field. Does not trigger a scan; the operator must
    /// scan manually or apply a preset.
    pub async fn set_field(&self, field: TelemetryField, value: f64) -> TelemetryReading {
        let mut state = self.state.write().await;
        state.reading.set(field, value);
        state.reading.clone()
    }

    pub async fn toggle_audio(&self) -> bool {
        let mut state = self.state.write().await;
        state.audio_enabled = !state.audio_enabled;
        state.audio_enabled
    }

    /// Run one analysis pass against the current reading and store the
    /// result. The analyzer is awaited without holding the state lock, so a
    /// scan triggered meanwhile races with this one and the last writer wins.
    pub async fn trigger_scan(&self) {
        let reading = {
            let mut state = self.state.write().await;
            state.scans_in_flight += 1;
            state.reading.clone()
        };

        let assessment = self.analyzer.analyze(&reading).await;

        let audible = {
            let mut state = self.state.write().await;
            state.assessment = assessment.clone();
            state.last_scan = Utc::now();
            state.scans_in_flight -= 1;
            state.audio_enabled
                && !assessment.alerts.is_empty()
                && assessment.risk_level > AUDIBLE_RISK_THRESHOLD
        };

        if audible {
            let utterance = format!(
                "Warning. {}. Risk level {}.",
                assessment.alerts[0], assessment.risk_level
            );
            self.speech.speak(&utterance).await;
        }
    }

    /// Overwrite the reading with a scenario preset (keeping any GPS fix)
    /// and immediately run exactly one scan. This is the only automatic
    /// scan trigger.
    pub async fn apply_preset(&self, preset: ScenarioPreset) {
        {
            let mut state = self.state.write().await;
            let coordinates = state.reading.coordinates;
            state.reading = preset.reading(coordinates);
        }
        self.trigger_scan().await;
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        let gauge_status = GaugeStatus::for_risk(state.assessment.risk_level);
        DashboardSnapshot {
            reading: state.reading.clone(),
            gauge_status,
            gauge_color: gauge_status.color(),
            sos_visible: sos_visible(&state.assessment),
            route_steps: route_step_views(&state.assessment.recommended_route.steps),
            map_markers: place_markers(&state.assessment.safe_zones),
            assessment: state.assessment.clone(),
            scanning: state.scans_in_flight > 0,
            audio_enabled: state.audio_enabled,
            last_scan: state.last_scan,
        }
    }
}
