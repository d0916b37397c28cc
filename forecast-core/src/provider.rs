use async_trait::async_trait;
use std::fmt::Debug;

use crate::WeatherError;

pub mod openmeteo;

pub use openmeteo::{
    CurrentSeries, DailySeries, ForecastResponse, GeoMatch, HourlySeries, OpenMeteoProvider,
};

/// Upstream source of geocoding matches and raw forecasts.
///
/// Implementations make exactly one upstream call per method invocation and
/// never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Place-name search, best match first. An empty vector means "no match".
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeoMatch>, WeatherError>;

    /// Current, hourly and daily series for the given coordinates, in the
    /// location's own timezone.
    async fn forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, WeatherError>;
}
