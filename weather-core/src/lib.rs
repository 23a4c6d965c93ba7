//! Core library for the weather aggregator service.
//!
//! This crate defines:
//! - City-name validation and the tagged error taxonomy
//! - Geocoding (city name → coordinates) for coordinate-based providers
//! - Abstraction over weather providers and the four concrete adapters
//! - The concurrent fan-out aggregator that averages provider readings
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod validate;

pub use aggregate::Aggregator;
pub use config::Config;
pub use error::{AggregateError, FetchError, ValidationError};
pub use geocode::Geocoder;
pub use model::{AggregateResponse, Coordinates, ProviderReading};
pub use provider::{ProviderId, WeatherProvider, providers_from_config};
pub use validate::validate_city_name;
