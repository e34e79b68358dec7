// Risk assessment domain models
//
// Wire field names follow the analysis response schema exactly; the external
// model replies with this shape or the reply is rejected wholesale.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerType {
    Flood,
    Fire,
    Landslide,
    Cyclone,
    Earthquake,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdDensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SosFlag {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub name: String,
    pub distance_km: f64,
    pub eta_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationRoute {
    pub steps: Vec<String>,
    pub total_distance_km: f64,
    pub eta_min: f64,
}

/// The structured result of one analysis pass. Replaced wholesale on every
/// completed pass, never merged with the previous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(deserialize_with = "deserialize_risk_level")]
    pub risk_level: u8,
    pub danger_type: DangerType,
    pub risk_description: String,
    pub safe_zones: Vec<SafeZone>,
    pub recommended_route: EvacuationRoute,
    pub crowd_density: CrowdDensity,
    pub alerts: Vec<String>,
    pub sos_recommendation: SosFlag,
}

/// The schema declares a number; models occasionally emit "72.0". Round to
/// an integer and reject anything outside 0..=100.
fn deserialize_risk_level<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || !(0.0..=100.0).contains(&raw) {
        return Err(serde::de::Error::custom(format!(
            "risk_level {} outside 0-100",
            raw
        )));
    }
    Ok(raw.round() as u8)
}

impl RiskAssessment {
    /// Parse and validate a model reply. A reply missing a required field,
    /// using an unknown enum token, or carrying out-of-range numbers is a
    /// failure, never a partial record.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let assessment: RiskAssessment = serde_json::from_str(text)?;
        assessment.validate()?;
        Ok(assessment)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for zone in &self.safe_zones {
            if !zone.distance_km.is_finite() || zone.distance_km < 0.0 {
                anyhow::bail!("safe zone '{}' has invalid distance", zone.name);
            }
            if !zone.eta_min.is_finite() || zone.eta_min < 0.0 {
                anyhow::bail!("safe zone '{}' has invalid ETA", zone.name);
            }
        }
        let route = &self.recommended_route;
        if !route.total_distance_km.is_finite() || route.total_distance_km < 0.0 {
            anyhow::bail!("route has invalid total distance");
        }
        if !route.eta_min.is_finite() || route.eta_min < 0.0 {
            anyhow::bail!("route has invalid ETA");
        }
        Ok(())
    }

    /// The fixed record substituted whenever the analysis call fails.
    /// Deliberately distinguishable from [`RiskAssessment::initial`] so an
    /// operator can tell "error" apart from "no scan yet".
    pub fn fallback() -> Self {
        Self {
            risk_level: 0,
            danger_type: DangerType::Unknown,
            risk_description: "System error. Unable to process telemetry.".to_string(),
            safe_zones: Vec::new(),
            recommended_route: EvacuationRoute {
                steps: Vec::new(),
                total_distance_km: 0.0,
                eta_min: 0.0,
            },
            crowd_density: CrowdDensity::Low,
            alerts: vec!["SYSTEM MALFUNCTION - SEEK SHELTER".to_string()],
            sos_recommendation: SosFlag::No,
        }
    }

    /// The "all clear" record shown before any scan has completed.
    pub fn initial() -> Self {
        Self {
            risk_level: 10,
            danger_type: DangerType::Unknown,
            risk_description: "Conditions normal. Monitoring active.".to_string(),
            safe_zones: Vec::new(),
            recommended_route: EvacuationRoute {
                steps: vec!["Maintain situational awareness.".to_string()],
                total_distance_km: 0.0,
                eta_min: 0.0,
            },
            crowd_density: CrowdDensity::Low,
            alerts: Vec::new(),
            sos_recommendation: SosFlag::No,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reply() -> String {
        serde_json::json!({
            "risk_level": 82,
            "danger_type": "flood",
            "risk_description": "Severe flooding in low-lying areas.",
            "safe_zones": [
                { "name": "Hillcrest School", "distance_km": 2.4, "eta_min": 30 }
            ],
            "recommended_route": {
                "steps": ["Head north on Main St.", "Climb to the school grounds."],
                "total_distance_km": 2.4,
                "eta_min": 30
            },
            "crowd_density": "medium",
            "alerts": ["Flash flood warning in effect."],
            "sos_recommendation": "yes"
        })
        .to_string()
    }

    #[test]
    fn test_parse_valid_reply() {
        let assessment = RiskAssessment::parse(&sample_reply()).unwrap();
        assert_eq!(assessment.risk_level, 82);
        assert_eq!(assessment.danger_type, DangerType::Flood);
        assert_eq!(assessment.crowd_density, CrowdDensity::Medium);
        assert_eq!(assessment.sos_recommendation, SosFlag::Yes);
        assert_eq!(assessment.safe_zones.len(), 1);
        assert_eq!(assessment.recommended_route.steps.len(), 2);
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let mut value: serde_json::Value = serde_json::from_str(&sample_reply()).unwrap();
        value.as_object_mut().unwrap().remove("alerts");
        assert!(RiskAssessment::parse(&value.to_string()).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_danger_type() {
        let reply = sample_reply().replace("\"flood\"", "\"meteor\"");
        assert!(RiskAssessment::parse(&reply).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_risk() {
        let reply = sample_reply().replace("\"risk_level\":82", "\"risk_level\":140");
        assert!(RiskAssessment::parse(&reply).is_err());
    }

    #[test]
    fn test_parse_rounds_fractional_risk() {
        let reply = sample_reply().replace("\"risk_level\":82", "\"risk_level\":81.6");
        let assessment = RiskAssessment::parse(&reply).unwrap();
        assert_eq!(assessment.risk_level, 82);
    }

    #[test]
    fn test_parse_rejects_negative_distance() {
        let reply = sample_reply().replace("\"distance_km\":2.4", "\"distance_km\":-2.4");
        assert!(RiskAssessment::parse(&reply).is_err());
    }

    #[test]
    fn test_parse_rejects_non_json_reply() {
        assert!(RiskAssessment::parse("").is_err());
        assert!(RiskAssessment::parse("I cannot comply").is_err());
    }

    #[test]
    fn test_fallback_record() {
        let fallback = RiskAssessment::fallback();
        assert_eq!(fallback.risk_level, 0);
        assert_eq!(fallback.danger_type, DangerType::Unknown);
        assert_eq!(
            fallback.risk_description,
            "System error. Unable to process telemetry."
        );
        assert!(fallback.safe_zones.is_empty());
        assert!(fallback.recommended_route.steps.is_empty());
        assert_eq!(fallback.recommended_route.total_distance_km, 0.0);
        assert_eq!(fallback.recommended_route.eta_min, 0.0);
        assert_eq!(fallback.crowd_density, CrowdDensity::Low);
        assert_eq!(
            fallback.alerts,
            vec!["SYSTEM MALFUNCTION - SEEK SHELTER".to_string()]
        );
        assert_eq!(fallback.sos_recommendation, SosFlag::No);
    }

    #[test]
    fn test_fallback_distinct_from_initial() {
        assert_ne!(RiskAssessment::fallback(), RiskAssessment::initial());
    }
}
