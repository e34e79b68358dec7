// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod gemini_client;
pub mod geolocation;
pub mod speech;
