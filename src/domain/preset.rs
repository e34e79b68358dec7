// Scenario preset domain model

use super::telemetry::{Coordinates, TelemetryReading};
use std::str::FromStr;

/// A named telemetry override simulating a specific disaster scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPreset {
    Clear,
    Wildfire,
    Flood,
    Earthquake,
}

impl ScenarioPreset {
    /// Build the full reading for this scenario. Starts from the session
    /// defaults and keeps whatever GPS fix is already held.
    pub fn reading(self, coordinates: Option<Coordinates>) -> TelemetryReading {
        let mut reading = TelemetryReading {
            coordinates,
            ..TelemetryReading::default()
        };
        match self {
            ScenarioPreset::Clear => {}
            ScenarioPreset::Wildfire => {
                reading.temperature = 45.0;
                reading.wind_speed = 80.0;
                reading.air_quality_index = 450.0;
                reading.precipitation = 0.0;
            }
            ScenarioPreset::Flood => {
                reading.precipitation = 120.0;
                reading.water_level = 4.5;
                reading.wind_speed = 60.0;
            }
            ScenarioPreset::Earthquake => {
                reading.seismic_activity = 7.2;
                reading.wind_speed = 5.0;
            }
        }
        reading
    }
}

impl FromStr for ScenarioPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clear" => Ok(ScenarioPreset::Clear),
            "wildfire" => Ok(ScenarioPreset::Wildfire),
            "flood" => Ok(ScenarioPreset::Flood),
            "earthquake" => Ok(ScenarioPreset::Earthquake),
            other => anyhow::bail!("unknown scenario preset: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildfire_overrides() {
        let reading = ScenarioPreset::Wildfire.reading(None);
        assert_eq!(reading.temperature, 45.0);
        assert_eq!(reading.wind_speed, 80.0);
        assert_eq!(reading.air_quality_index, 450.0);
        assert_eq!(reading.precipitation, 0.0);
        // Untouched fields keep their defaults
        assert_eq!(reading.water_level, 0.5);
        assert_eq!(reading.seismic_activity, 0.0);
    }

    #[test]
    fn test_flood_overrides() {
        let reading = ScenarioPreset::Flood.reading(None);
        assert_eq!(reading.precipitation, 120.0);
        assert_eq!(reading.water_level, 4.5);
        assert_eq!(reading.wind_speed, 60.0);
    }

    #[test]
    fn test_earthquake_overrides() {
        let reading = ScenarioPreset::Earthquake.reading(None);
        assert_eq!(reading.seismic_activity, 7.2);
        assert_eq!(reading.wind_speed, 5.0);
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let reading = ScenarioPreset::Clear.reading(None);
        assert_eq!(reading, TelemetryReading::default());
    }

    #[test]
    fn test_preset_preserves_gps_fix() {
        let fix = Coordinates {
            latitude: 12.97,
            longitude: 77.59,
        };
        let reading = ScenarioPreset::Flood.reading(Some(fix));
        assert_eq!(reading.coordinates, Some(fix));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(
            "wildfire".parse::<ScenarioPreset>().unwrap(),
            ScenarioPreset::Wildfire
        );
        assert_eq!(
            "FLOOD".parse::<ScenarioPreset>().unwrap(),
            ScenarioPreset::Flood
        );
        assert!("tsunami".parse::<ScenarioPreset>().is_err());
    }
}
