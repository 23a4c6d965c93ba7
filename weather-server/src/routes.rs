use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use weather_core::{AggregateError, AggregateResponse, Aggregator};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Weather Aggregator API!" }))
}

pub async fn weather(
    State(aggregator): State<Aggregator>,
    Path(city): Path<String>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let response = aggregator.aggregate(&city).await?;
    Ok(Json(response))
}

/// Client-facing error body: `{"detail": ...}` under the status the
/// aggregate classification maps to. Upstream errors never leak verbatim.
pub struct ApiError(AggregateError);

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AggregateError::Validation(_) => StatusCode::BAD_REQUEST,
            AggregateError::NotFound { .. } => StatusCode::NOT_FOUND,
            AggregateError::ServiceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::ValidationError;

    fn status_of(err: AggregateError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = AggregateError::Validation(ValidationError::NumbersNotAllowed("a1".into()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_majority_is_404() {
        let err = AggregateError::NotFound {
            city: "Atlantis".into(),
        };
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unavailability_is_500() {
        assert_eq!(
            status_of(AggregateError::ServiceUnavailable),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_detail_names_the_violated_rule() {
        let err = AggregateError::Validation(ValidationError::LengthOutOfRange("ab".into()));
        assert!(err.to_string().contains("too short or too long"));
    }
}
