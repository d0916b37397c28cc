use std::sync::Arc;

use crate::{
    WeatherError,
    config::Config,
    forecast::ForecastNormalizer,
    geocode::Geocoder,
    model::{LocationDescriptor, WeatherSnapshot},
    provider::{OpenMeteoProvider, WeatherProvider},
};

/// The geocode-then-forecast pipeline.
///
/// Every call is independent; concurrent calls may complete in any order and
/// it is up to the caller to keep only the result it still wants.
#[derive(Debug, Clone)]
pub struct ForecastService {
    geocoder: Geocoder,
    normalizer: ForecastNormalizer,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            geocoder: Geocoder::new(provider.clone()),
            normalizer: ForecastNormalizer::new(provider),
        }
    }

    /// Service backed by Open-Meteo at the configured endpoints.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(OpenMeteoProvider::new(config.endpoints.clone())))
    }

    pub async fn weather_for_place(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        let location = self.geocoder.resolve_by_name(query).await?;
        self.normalizer
            .fetch_and_normalize(location.lat, location.lon, &location)
            .await
    }

    pub async fn weather_for_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let location = Geocoder::resolve_by_coordinates(lat, lon);
        self.normalizer.fetch_and_normalize(lat, lon, &location).await
    }

    pub async fn suggestions(&self, query: &str) -> Vec<LocationDescriptor> {
        self.geocoder.resolve_suggestions(query).await
    }
}
