use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderId, WeatherProvider, http_client, transient};
use crate::error::FetchError;
use crate::geocode::Geocoder;
use crate::model::ProviderReading;
use crate::validate::validate_city_name;

/// Queries by coordinates, so every fetch geocodes the city first. The
/// geocoder's not-found and transient failures propagate unchanged. No
/// credential required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoder: Geocoder,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoder: Geocoder) -> Self {
        Self {
            geocoder,
            http: http_client(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenMeteo
    }

    async fn fetch(&self, city: &str) -> Result<ProviderReading, FetchError> {
        validate_city_name(city)?;

        let coords = self.geocoder.resolve(city).await?;

        let res = self
            .http
            .get("https://api.open-meteo.com/v1/forecast")
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| transient(self.id(), city, format!("request failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            return Err(transient(
                self.id(),
                city,
                format!("request failed with status {status}"),
            ));
        }

        let parsed: OmResponse = res
            .json()
            .await
            .map_err(|e| transient(self.id(), city, format!("malformed response: {e}")))?;

        Ok(ProviderReading {
            source: self.id().to_string(),
            temperature: parsed.current_weather.temperature,
        })
    }
}
