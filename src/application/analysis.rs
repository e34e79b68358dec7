// Capability traits for the external collaborators

use crate::domain::assessment::RiskAssessment;
use crate::domain::telemetry::{Coordinates, TelemetryReading};
use async_trait::async_trait;

/// The external reasoning seam. Implementations never fail outward: every
/// transport, API, or schema failure is absorbed into the fixed fallback
/// assessment, so callers always receive a displayable record.
#[async_trait]
pub trait RiskAnalyzer: Send + Sync {
    async fn analyze(&self, reading: &TelemetryReading) -> RiskAssessment;
}

/// Fire-and-forget speech output. No completion or failure signal is
/// consumed by contract.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, utterance: &str);
}

/// One-shot position lookup at startup. Failure leaves coordinates absent;
/// there is no retry.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Option<Coordinates>;
}
