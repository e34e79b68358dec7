// IP geolocation adapter - one-shot position lookup at startup

use crate::application::analysis::Geolocator;
use crate::domain::telemetry::Coordinates;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct IpGeolocator {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GeolocationReply {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
}

impl IpGeolocator {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self) -> Result<Coordinates> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .context("Failed to reach geolocation endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("geolocation endpoint returned status {}", response.status());
        }

        let reply = response
            .json::<GeolocationReply>()
            .await
            .context("Failed to parse geolocation response")?;

        Ok(Coordinates {
            latitude: reply.latitude,
            longitude: reply.longitude,
        })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Option<Coordinates> {
        match self.fetch().await {
            Ok(fix) => Some(fix),
            Err(e) => {
                // Non-fatal: the session simply runs without a GPS fix.
                tracing::warn!(error = %e, "geolocation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_accepts_short_field_names() {
        let reply: GeolocationReply =
            serde_json::from_str("{\"lat\": 12.97, \"lon\": 77.59}").unwrap();
        assert_eq!(reply.latitude, 12.97);
        assert_eq!(reply.longitude, 77.59);
    }
}
