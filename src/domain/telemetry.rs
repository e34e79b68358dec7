// Telemetry domain models

use serde::{Deserialize, Serialize};

/// A GPS fix. Absence of a fix is a distinct state from (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current simulated sensor readings. Lives for the whole session and is
/// mutated in place by the operator or by applying a scenario preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReading {
    pub temperature: f64,
    pub wind_speed: f64,
    pub water_level: f64,
    pub seismic_activity: f64,
    pub air_quality_index: f64,
    pub precipitation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Default for TelemetryReading {
    fn default() -> Self {
        Self {
            temperature: 22.0,
            wind_speed: 10.0,
            water_level: 0.5,
            seismic_activity: 0.0,
            air_quality_index: 40.0,
            precipitation: 0.0,
            coordinates: None,
        }
    }
}

/// The adjustable sensor fields. Coordinates are not operator-adjustable;
/// they come from the geolocation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryField {
    Temperature,
    WindSpeed,
    WaterLevel,
    SeismicActivity,
    AirQualityIndex,
    Precipitation,
}

impl TelemetryField {
    /// Slider range for this field. The model itself accepts any finite
    /// value; callers clamp input to this range before assignment.
    pub fn range(self) -> (f64, f64) {
        match self {
            TelemetryField::Temperature => (-30.0, 100.0),
            TelemetryField::WindSpeed => (0.0, 250.0),
            TelemetryField::WaterLevel => (0.0, 20.0),
            TelemetryField::SeismicActivity => (0.0, 10.0),
            TelemetryField::AirQualityIndex => (0.0, 500.0),
            TelemetryField::Precipitation => (0.0, 200.0),
        }
    }
}

impl TelemetryReading {
    pub fn set(&mut self, field: TelemetryField, value: f64) {
        match field {
            TelemetryField::Temperature => self.temperature = value,
            TelemetryField::WindSpeed => self.wind_speed = value,
            TelemetryField::WaterLevel => self.water_level = value,
            TelemetryField::SeismicActivity => self.seismic_activity = value,
            TelemetryField::AirQualityIndex => self.air_quality_index = value,
            TelemetryField::Precipitation => self.precipitation = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let reading = TelemetryReading::default();
        assert_eq!(reading.temperature, 22.0);
        assert_eq!(reading.wind_speed, 10.0);
        assert_eq!(reading.water_level, 0.5);
        assert_eq!(reading.seismic_activity, 0.0);
        assert_eq!(reading.air_quality_index, 40.0);
        assert_eq!(reading.precipitation, 0.0);
        assert!(reading.coordinates.is_none());
    }

    #[test]
    fn test_set_field() {
        let mut reading = TelemetryReading::default();
        reading.set(TelemetryField::WaterLevel, 4.5);
        assert_eq!(reading.water_level, 4.5);
        reading.set(TelemetryField::Temperature, -12.0);
        assert_eq!(reading.temperature, -12.0);
    }

    #[test]
    fn test_field_ranges() {
        assert_eq!(TelemetryField::Temperature.range(), (-30.0, 100.0));
        assert_eq!(TelemetryField::AirQualityIndex.range(), (0.0, 500.0));
    }

    #[test]
    fn test_missing_fix_is_not_zero_coordinates() {
        let absent = TelemetryReading::default();
        let zeroed = TelemetryReading {
            coordinates: Some(Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            }),
            ..TelemetryReading::default()
        };
        assert_ne!(absent, zeroed);
    }
}
