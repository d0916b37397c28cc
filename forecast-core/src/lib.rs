//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Geocoding of place names and coordinates
//! - Fetching and normalizing Open-Meteo forecasts into [`WeatherSnapshot`]
//! - Unit conversion and the weather-code table
//! - A dashboard state container and backdrop selection for front ends
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod backdrop;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod service;
pub mod units;

pub use backdrop::Backdrop;
pub use condition::{ConditionCode, resolve_condition};
pub use config::{Config, Endpoints, HomeLocation};
pub use dashboard::{Dashboard, DashboardState};
pub use error::WeatherError;
pub use forecast::ForecastNormalizer;
pub use geocode::Geocoder;
pub use geolocation::{FixedGeolocator, GeolocationError, Geolocator, Position, PositionOptions};
pub use model::{CurrentConditions, DailyEntry, HourlyEntry, LocationDescriptor, WeatherSnapshot};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use service::ForecastService;
pub use units::{Distance, Speed, Temperature, TemperatureUnit};
