use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProviderId, WeatherProvider, http_client, transient};
use crate::error::FetchError;
use crate::model::ProviderReading;
use crate::validate::validate_city_name;

/// Queries by city name with `units=m` for Celsius. Weatherstack reports
/// its own errors inside a 200 body without the `current` envelope, so a
/// missing envelope is treated as a malformed response.
#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    api_key: String,
    http: Client,
}

impl WeatherstackProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct WsResponse {
    #[serde(default)]
    current: Option<WsCurrent>,
}

#[async_trait]
impl WeatherProvider for WeatherstackProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Weatherstack
    }

    async fn fetch(&self, city: &str) -> Result<ProviderReading, FetchError> {
        validate_city_name(city)?;

        let res = self
            .http
            .get("http://api.weatherstack.com/current")
            .query(&[
                ("access_key", self.api_key.as_str()),
                ("query", city),
                ("units", "m"),
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

        let parsed: WsResponse = res
            .json()
            .await
            .map_err(|e| transient(self.id(), city, format!("malformed response: {e}")))?;

        let Some(current) = parsed.current else {
            return Err(transient(
                self.id(),
                city,
                "response missing 'current' envelope".to_string(),
            ));
        };

        Ok(ProviderReading {
            source: self.id().to_string(),
            temperature: current.temperature,
        })
    }
}
