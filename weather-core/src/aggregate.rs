use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::error;

use crate::error::{AggregateError, FetchError};
use crate::model::{AggregateResponse, ProviderReading};
use crate::provider::WeatherProvider;

/// Upper bound on one provider call, on top of the HTTP client's own
/// timeouts, so a hung upstream costs at most one window and never stalls
/// the join.
const PROVIDER_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Fans one city query out to every provider concurrently, waits for all
/// of them, and collapses the outcomes into a single classified result.
#[derive(Clone)]
pub struct Aggregator {
    providers: Vec<Arc<dyn WeatherProvider>>,
    call_timeout: Duration,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn WeatherProvider>>) -> Self {
        Self {
            providers,
            call_timeout: PROVIDER_CALL_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_call_timeout(providers: Vec<Arc<dyn WeatherProvider>>, call_timeout: Duration) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    /// Run one aggregate query.
    ///
    /// All providers are dispatched at once and every outcome is awaited;
    /// a failure in one never cancels the others. Classification:
    /// validation errors win outright, any successes produce an averaged
    /// response, and an all-failed round is a 404 only when at least half
    /// the providers said not-found.
    pub async fn aggregate(&self, city: &str) -> Result<AggregateResponse, AggregateError> {
        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let city = city.to_string();
                let call_timeout = self.call_timeout;

                tokio::spawn(async move {
                    match timeout(call_timeout, provider.fetch(&city)).await {
                        Ok(outcome) => outcome,
                        Err(_) => Err(FetchError::Transient {
                            reason: format!(
                                "{}: no response within {call_timeout:?}",
                                provider.id()
                            ),
                        }),
                    }
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            // A panicked adapter task counts like any other upstream failure.
            outcomes.push(handle.await.unwrap_or_else(|e| {
                Err(FetchError::Transient {
                    reason: format!("adapter task failed: {e}"),
                })
            }));
        }

        classify(city, outcomes)
    }
}

fn classify(
    city: &str,
    outcomes: Vec<Result<ProviderReading, FetchError>>,
) -> Result<AggregateResponse, AggregateError> {
    let total = outcomes.len();
    let mut details = Vec::new();
    let mut not_found = 0usize;

    for outcome in outcomes {
        match outcome {
            Ok(reading) => details.push(reading),
            // The name was never well-formed; nothing else matters.
            Err(FetchError::Validation(err)) => {
                error!("Validation error for city '{city}': {err}");
                return Err(AggregateError::Validation(err));
            }
            Err(err @ FetchError::NotFound { .. }) => {
                error!("Error fetching weather data for city '{city}': {err}");
                not_found += 1;
            }
            Err(err @ FetchError::Transient { .. }) => {
                error!("Error fetching weather data for city '{city}': {err}");
            }
        }
    }

    if details.is_empty() {
        // A majority of not-found answers is authoritative; a mixed bag of
        // transient failures is only a temporary outage. At least one
        // provider must actually have said not-found, so a degenerate
        // threshold of zero never turns an outage into a 404.
        if not_found > 0 && not_found >= total / 2 {
            error!("City '{city}' not found in any weather service");
            return Err(AggregateError::NotFound {
                city: city.to_string(),
            });
        }
        error!("Weather data temporarily unavailable for city '{city}'");
        return Err(AggregateError::ServiceUnavailable);
    }

    let average = details.iter().map(|r| r.temperature).sum::<f64>() / details.len() as f64;

    Ok(AggregateResponse {
        city: city.to_string(),
        average_temperature: average,
        details,
    })
}
