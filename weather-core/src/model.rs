use serde::Serialize;

/// Geographic point produced by the geocoder; consumed only by providers
/// that query by coordinates. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One provider's normalized current-temperature reading, in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderReading {
    pub source: String,
    pub temperature: f64,
}

/// The averaged result over every provider that answered.
///
/// `average_temperature` is the arithmetic mean of exactly the
/// temperatures in `details`, and `details` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResponse {
    pub city: String,
    pub average_temperature: f64,
    pub details: Vec<ProviderReading>,
}
