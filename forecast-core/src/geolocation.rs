//! Acquisition of the user's own coordinates.
//!
//! The pipeline itself never asks where the user is; the dashboard does, via a
//! [`Geolocator`] supplied by the host platform.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

use crate::config::HomeLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location information is unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Geolocation is not supported on this platform")]
    UnsupportedEnvironment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub acquired_at: DateTime<Utc>,
}

/// Bounds the caller places on a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Give up on the platform after this long.
    pub timeout: Duration,
    /// A previously acquired position younger than this may be reused.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

impl Position {
    pub fn is_fresh(&self, now: DateTime<Utc>, maximum_age: Duration) -> bool {
        (now - self.acquired_at)
            .to_std()
            .map(|age| age <= maximum_age)
            // acquired_at in the future: clock skew, treat as fresh
            .unwrap_or(true)
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Position, GeolocationError>;
}

/// Reports a fixed, configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    home: HomeLocation,
}

impl FixedGeolocator {
    pub fn new(home: HomeLocation) -> Self {
        Self { home }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        Ok(Position {
            latitude: self.home.latitude,
            longitude: self.home.longitude,
            acquired_at: Utc::now(),
        })
    }
}
