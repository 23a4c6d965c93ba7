use std::env;

use tracing::warn;

use crate::provider::ProviderId;

/// Provider credentials, read once at process start and passed into the
/// adapter constructors; nothing reads the environment after that.
///
/// A missing key is reported here but is not fatal: the affected adapter
/// sends an unauthenticated request and the upstream rejection surfaces
/// as a transient failure for that provider only.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub openweathermap_api_key: String,
    pub weatherapi_api_key: String,
    pub weatherstack_api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openweathermap_api_key: read_key("OPENWEATHERMAP_API_KEY"),
            weatherapi_api_key: read_key("WEATHER_API_KEY"),
            weatherstack_api_key: read_key("WEATHERSTACK_API_KEY"),
        }
    }

    /// Credential for a provider, if that provider needs one.
    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        match id {
            ProviderId::OpenWeatherMap => Some(&self.openweathermap_api_key),
            ProviderId::WeatherApi => Some(&self.weatherapi_api_key),
            ProviderId::Weatherstack => Some(&self.weatherstack_api_key),
            ProviderId::OpenMeteo => None,
        }
    }
}

fn read_key(var: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!("{var} is not set; requests to the matching provider will be unauthenticated");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_providers_report_their_credential() {
        let cfg = Config {
            openweathermap_api_key: "OWM_KEY".into(),
            weatherapi_api_key: "WA_KEY".into(),
            weatherstack_api_key: "WS_KEY".into(),
        };

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeatherMap), Some("OWM_KEY"));
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("WA_KEY"));
        assert_eq!(cfg.provider_api_key(ProviderId::Weatherstack), Some("WS_KEY"));
    }

    #[test]
    fn open_meteo_needs_no_credential() {
        let cfg = Config::default();
        assert_eq!(cfg.provider_api_key(ProviderId::OpenMeteo), None);
    }
}
