// Domain layer - Pure value records and display rules
pub mod assessment;
pub mod display;
pub mod preset;
pub mod telemetry;
