use thiserror::Error;

/// Failures surfaced by the geocoding and forecast pipeline.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoding service returned no match for the query.
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// The upstream call failed at the transport level or answered with a
    /// non-success status.
    #[error("{endpoint} request failed: {message}")]
    Service {
        endpoint: &'static str,
        message: String,
    },

    /// The upstream answered, but its body was not the JSON we expect.
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A parallel time series did not line up with its `time` axis.
    #[error("Provider returned misaligned {series} series: {actual} values for {expected} timestamps")]
    InconsistentSeries {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl WeatherError {
    pub(crate) fn service(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            endpoint,
            message: message.into(),
        }
    }

    /// True for failures caused by the upstream service rather than by the
    /// query itself.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Service { .. } | Self::Decode { .. } | Self::InconsistentSeries { .. }
        )
    }
}
