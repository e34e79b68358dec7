use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub geolocation: GeolocationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    /// Usually supplied via SENTINEL__GEMINI__API_KEY rather than the file.
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub endpoint: String,
}

fn default_true() -> bool {
    true
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/analysis"))
        .add_source(config::Environment::with_prefix("SENTINEL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_defaults_to_empty() {
        let settings: GeminiSettings = toml::from_str(
            "base_url = \"https://generativelanguage.googleapis.com\"\nmodel = \"gemini-2.5-flash\"",
        )
        .unwrap();
        assert!(settings.api_key.is_empty());
        assert_eq!(settings.model, "gemini-2.5-flash");
    }
}
