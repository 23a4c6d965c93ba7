use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::error::FetchError;
use crate::model::Coordinates;
use crate::validate::validate_city_name;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim requires an identifying user agent on every request.
const USER_AGENT: &str = "weather-aggregator";

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// City-name to coordinates resolver backed by the Nominatim search API.
///
/// Every call is one independent lookup: no retries, no caching, even
/// within a single request.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: Client,
}

impl Geocoder {
    pub fn new() -> Self {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Resolve a city name to coordinates.
    ///
    /// Fails fast with the validation error for malformed names; an empty
    /// result set means the city is unknown, anything else that goes
    /// wrong is transient.
    pub async fn resolve(&self, city: &str) -> Result<Coordinates, FetchError> {
        validate_city_name(city)?;

        let res = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| transient(city, &format!("geocoding request failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            return Err(transient(
                city,
                &format!("geocoding request failed with status {status}"),
            ));
        }

        let places: Vec<Place> = res
            .json()
            .await
            .map_err(|e| transient(city, &format!("unreadable geocoding response: {e}")))?;

        let Some(place) = places.first() else {
            error!("City not found by geocoder: '{city}'");
            return Err(FetchError::NotFound {
                city: city.to_string(),
            });
        };

        parse_coordinates(place)
            .ok_or_else(|| transient(city, "malformed coordinates in geocoding response"))
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_coordinates(place: &Place) -> Option<Coordinates> {
    let latitude: f64 = place.lat.parse().ok()?;
    let longitude: f64 = place.lon.parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(Coordinates {
        latitude,
        longitude,
    })
}

fn transient(city: &str, reason: &str) -> FetchError {
    error!("Error getting coordinates for city '{city}': {reason}");
    FetchError::Transient {
        reason: reason.to_string(),
    }
}
