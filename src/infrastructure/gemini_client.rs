// Gemini-backed risk analyzer
//
// The single seam where external failure becomes data: every transport, API,
// or schema failure is logged with its cause and collapsed into the fixed
// fallback assessment.

use crate::application::analysis::RiskAnalyzer;
use crate::domain::assessment::RiskAssessment;
use crate::domain::telemetry::TelemetryReading;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

const SYSTEM_INSTRUCTION: &str = "\
You are an advanced Real-Time Disaster Evacuation & Risk Guidance System. Your job is to analyze dynamic environmental data and provide the safest possible evacuation path, risk levels, and alerts.

Your responsibilities:
1. Read and analyze incoming data: weather, fire alerts, flood levels, map routes, GPS coordinates, and population density.
2. Predict real-time danger probability (0-100 risk score).
3. Generate safe evacuation routes with step-by-step guidance.
4. Provide dynamic voice-style alerts for emergency conditions.
5. Detect crowd density and avoid congested routes.
6. Identify and recommend nearest safe zones.
7. Trigger SOS message suggestions if risk is extremely high.

Always respond in structured JSON. Never guess - always reason based on data provided.
If exact location data is missing, infer general safe strategies based on the environmental conditions described.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("analysis reply contained no text")]
    EmptyReply,
    #[error("analysis reply violates the assessment schema: {0}")]
    Schema(#[source] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Natural-language rendering of the current reading. A missing GPS fix
    /// is reported as lost signal, not as zero coordinates.
    fn build_prompt(reading: &TelemetryReading) -> String {
        let location = match reading.coordinates {
            Some(fix) => format!("{}, {}", fix.latitude, fix.longitude),
            None => "Signal Lost / Unknown".to_string(),
        };
        format!(
            "CURRENT SENSOR TELEMETRY:\n\
             - GPS Location: {}\n\
             - Temperature: {}°C\n\
             - Wind Speed: {} km/h\n\
             - Water Level: {} meters (Normal: < 1m)\n\
             - Seismic Activity (Richter): {}\n\
             - Air Quality Index (AQI): {}\n\
             - Precipitation Rate: {} mm/h\n\n\
             Analyze this telemetry immediately. Identify threats. Calculate risk. Provide evacuation protocols.",
            location,
            reading.temperature,
            reading.wind_speed,
            reading.water_level,
            reading.seismic_activity,
            reading.air_quality_index,
            reading.precipitation,
        )
    }

    /// Structured-output schema mirroring [`RiskAssessment`] field for field.
    fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "risk_level": { "type": "NUMBER", "description": "0-100 risk score" },
                "danger_type": {
                    "type": "STRING",
                    "enum": ["flood", "fire", "landslide", "cyclone", "earthquake", "unknown"]
                },
                "risk_description": { "type": "STRING" },
                "safe_zones": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "distance_km": { "type": "NUMBER" },
                            "eta_min": { "type": "NUMBER" }
                        },
                        "required": ["name", "distance_km", "eta_min"]
                    }
                },
                "recommended_route": {
                    "type": "OBJECT",
                    "properties": {
                        "steps": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "total_distance_km": { "type": "NUMBER" },
                        "eta_min": { "type": "NUMBER" }
                    },
                    "required": ["steps", "total_distance_km", "eta_min"]
                },
                "crowd_density": { "type": "STRING", "enum": ["low", "medium", "high"] },
                "alerts": { "type": "ARRAY", "items": { "type": "STRING" } },
                "sos_recommendation": { "type": "STRING", "enum": ["yes", "no"] }
            },
            "required": [
                "risk_level",
                "danger_type",
                "risk_description",
                "safe_zones",
                "recommended_route",
                "crowd_density",
                "alerts",
                "sos_recommendation"
            ]
        })
    }

    fn request_body(reading: &TelemetryReading) -> Value {
        json!({
            "system_instruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "parts": [{ "text": Self::build_prompt(reading) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": Self::response_schema()
            }
        })
    }

    // The model may split one reply across several parts; they concatenate
    // into a single JSON document.
    fn extract_text(response: GenerateContentResponse) -> Result<String, AnalysisError> {
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnalysisError::EmptyReply);
        }
        Ok(text)
    }

    async fn request_assessment(
        &self,
        reading: &TelemetryReading,
    ) -> Result<RiskAssessment, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(reading))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, body });
        }

        let reply = response.json::<GenerateContentResponse>().await?;
        let text = Self::extract_text(reply)?;

        RiskAssessment::parse(&text).map_err(AnalysisError::Schema)
    }
}

#[async_trait]
impl RiskAnalyzer for GeminiClient {
    async fn analyze(&self, reading: &TelemetryReading) -> RiskAssessment {
        match self.request_assessment(reading).await {
            Ok(assessment) => {
                tracing::debug!(
                    risk_level = assessment.risk_level,
                    "analysis pass completed"
                );
                assessment
            }
            Err(e) => {
                tracing::error!(error = %e, "analysis failed, substituting fallback assessment");
                RiskAssessment::fallback()
            }
        }
    }
}
