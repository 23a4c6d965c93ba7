use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::provider::{
    openmeteo::OpenMeteoProvider, openweathermap::OpenWeatherMapProvider,
    weatherapi::WeatherApiProvider, weatherstack::WeatherstackProvider,
};
use crate::{Config, FetchError, Geocoder, ProviderReading};

pub mod openmeteo;
pub mod openweathermap;
pub mod weatherapi;
pub mod weatherstack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    WeatherApi,
    OpenMeteo,
    Weatherstack,
}

impl ProviderId {
    /// Display name used in the `source` field of a reading.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "OpenWeatherMap",
            ProviderId::WeatherApi => "WeatherAPI",
            ProviderId::OpenMeteo => "Open-Meteo",
            ProviderId::Weatherstack => "Weatherstack",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::OpenWeatherMap,
            ProviderId::WeatherApi,
            ProviderId::OpenMeteo,
            ProviderId::Weatherstack,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One third-party weather source, normalized to the common reading shape.
///
/// Contract: validate the city first, issue exactly one request, classify
/// every failure as validation, not-found, or transient. No retries.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, city: &str) -> Result<ProviderReading, FetchError>;
}

/// Construct the full adapter set from config, in `ProviderId::all()` order.
pub fn providers_from_config(config: &Config) -> Vec<Arc<dyn WeatherProvider>> {
    vec![
        Arc::new(OpenWeatherMapProvider::new(
            config.openweathermap_api_key.clone(),
        )),
        Arc::new(WeatherApiProvider::new(config.weatherapi_api_key.clone())),
        Arc::new(OpenMeteoProvider::new(Geocoder::new())),
        Arc::new(WeatherstackProvider::new(
            config.weatherstack_api_key.clone(),
        )),
    ]
}

/// Shared client settings for every adapter: bounded request and connect
/// timeouts so a slow upstream cannot stall an aggregate call on its own.
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to create HTTP client")
}

pub(crate) fn transient(id: ProviderId, city: &str, reason: String) -> FetchError {
    error!("Error fetching data from {id} for city '{city}': {reason}");
    FetchError::Transient {
        reason: format!("{id}: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids_have_unique_names() {
        let mut names: Vec<_> = ProviderId::all().iter().map(|id| id.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ProviderId::all().len());
    }

    #[test]
    fn display_matches_source_name() {
        assert_eq!(ProviderId::OpenMeteo.to_string(), "Open-Meteo");
        assert_eq!(ProviderId::WeatherApi.to_string(), "WeatherAPI");
    }

    #[test]
    fn providers_from_config_covers_every_provider() {
        let providers = providers_from_config(&Config::default());
        let ids: Vec<_> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ProviderId::all());
    }

    #[test]
    fn transient_errors_name_the_provider() {
        let err = transient(ProviderId::Weatherstack, "Budapest", "status 502".into());
        match err {
            FetchError::Transient { reason } => assert!(reason.starts_with("Weatherstack:")),
            other => panic!("expected transient error, got {other:?}"),
        }
    }
}
