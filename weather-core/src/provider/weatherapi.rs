use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderId, WeatherProvider, http_client, transient};
use crate::error::FetchError;
use crate::model::ProviderReading;
use crate::validate::validate_city_name;

/// Queries by city name; the API reports every unit side by side, so the
/// Celsius value is picked out by its `_c` suffix.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn fetch(&self, city: &str) -> Result<ProviderReading, FetchError> {
        validate_city_name(city)?;

        let res = self
            .http
            .get("http://api.weatherapi.com/v1/current.json")
            .query(&[("key", self.api_key.as_str()), ("q", city), ("aqi", "no")])
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

        let parsed: WaResponse = res
            .json()
            .await
            .map_err(|e| transient(self.id(), city, format!("malformed response: {e}")))?;

        Ok(ProviderReading {
            source: self.id().to_string(),
            temperature: parsed.current.temp_c,
        })
    }
}
