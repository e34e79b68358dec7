// Derived display rules - pure functions of the current assessment

use super::assessment::{RiskAssessment, SafeZone, SosFlag};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeStatus {
    Stable,
    Warning,
    Critical,
}

impl GaugeStatus {
    /// Strict thresholds: 40 and 75 themselves take the lower-severity branch.
    pub fn for_risk(risk_level: u8) -> Self {
        if risk_level > 75 {
            GaugeStatus::Critical
        } else if risk_level > 40 {
            GaugeStatus::Warning
        } else {
            GaugeStatus::Stable
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            GaugeStatus::Stable => "#10b981",
            GaugeStatus::Warning => "#f97316",
            GaugeStatus::Critical => "#ef4444",
        }
    }
}

/// The SOS call-to-action is shown iff the model recommended it.
pub fn sos_visible(assessment: &RiskAssessment) -> bool {
    assessment.sos_recommendation == SosFlag::Yes
}

/// One evacuation step as rendered: 1-based index, and a connector line to
/// the next step everywhere except after the final step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStepView {
    pub index: usize,
    pub instruction: String,
    pub has_connector: bool,
}

pub fn route_step_views(steps: &[String]) -> Vec<RouteStepView> {
    let last = steps.len().saturating_sub(1);
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| RouteStepView {
            index: i + 1,
            instruction: step.clone(),
            has_connector: i != last,
        })
        .collect()
}

/// A safe-zone marker as an (x, y) offset from the fixed map center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Spread markers around the center at evenly divided angles with a random
/// radial jitter. Strictly cosmetic radar-style placement; this is not a map
/// projection and carries no geospatial meaning.
pub fn place_markers(zones: &[SafeZone]) -> Vec<MapMarker> {
    let mut rng = rand::rng();
    let count = zones.len().max(1) as f64;
    zones
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let angle = (i as f64 / count) * 2.0 * std::f64::consts::PI;
            let distance = 40.0 + rng.random_range(0.0..60.0);
            MapMarker {
                name: zone.name.clone(),
                x: angle.cos() * distance,
                y: angle.sin() * distance,
            }
        })
        .collect()
}
