use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderId, WeatherProvider, http_client, transient};
use crate::error::FetchError;
use crate::model::ProviderReading;
use crate::validate::validate_city_name;

/// Queries by city name directly, with `units=metric` so the temperature
/// arrives in Celsius.
#[derive(Debug, Clone)]
pub struct OpenWeatherMapProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherMapProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeatherMap
    }

    async fn fetch(&self, city: &str) -> Result<ProviderReading, FetchError> {
        validate_city_name(city)?;

        let res = self
            .http
            .get("https://api.openweathermap.org/data/2.5/weather")
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
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

        let parsed: OwmResponse = res
            .json()
            .await
            .map_err(|e| transient(self.id(), city, format!("malformed response: {e}")))?;

        Ok(ProviderReading {
            source: self.id().to_string(),
            temperature: parsed.main.temp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[tokio::test]
    async fn invalid_city_fails_before_any_request() {
        let provider = OpenWeatherMapProvider::new("KEY".into());
        let err = provider.fetch("c1ty").await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Validation(ValidationError::NumbersNotAllowed("c1ty".into()))
        );
    }

    #[test]
    fn extracts_temperature_from_main_block() {
        let body = r#"{
            "name": "Budapest",
            "main": {"temp": 21.4, "feels_like": 20.9, "humidity": 40},
            "weather": [{"description": "clear sky"}]
        }"#;

        let parsed: OwmResponse = serde_json::from_str(body).expect("should parse");
        assert!((parsed.main.temp - 21.4).abs() < 1e-9);
    }

    #[test]
    fn missing_temperature_field_is_a_parse_error() {
        let body = r#"{"name": "Budapest", "main": {"humidity": 40}}"#;
        assert!(serde_json::from_str::<OwmResponse>(body).is_err());
    }
}
