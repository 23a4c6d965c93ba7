use thiserror::Error;

/// Rejection of a malformed city name. Variant order mirrors the order
/// the checks run in; the first failing check decides the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Numbers not allowed in city name: '{0}'")]
    NumbersNotAllowed(String),

    #[error("Invalid city name format: '{0}'")]
    InvalidFormat(String),

    #[error("City name too short or too long: '{0}'")]
    LengthOutOfRange(String),
}

/// Outcome classification for a single provider or geocoder call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("City '{city}' not found")]
    NotFound { city: String },

    #[error("transient upstream failure: {reason}")]
    Transient { reason: String },
}

/// Aggregate-level classification; maps 1:1 onto the HTTP surface
/// (400 / 404 / 500).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("City '{city}' not found")]
    NotFound { city: String },

    #[error("Weather data temporarily unavailable")]
    ServiceUnavailable,
}
