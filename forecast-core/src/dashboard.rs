//! State container for a dashboard front end.
//!
//! [`DashboardState`] is updated only through [`DashboardState::reduce`];
//! [`Dashboard`] runs the pipeline and feeds the outcomes back in as actions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    WeatherError,
    backdrop::{Backdrop, is_daytime},
    geolocation::{GeolocationError, Geolocator, Position, PositionOptions},
    model::{LocationDescriptor, WeatherSnapshot},
    service::ForecastService,
    units::TemperatureUnit,
};

pub const FETCH_FAILED: &str = "Failed to fetch weather data. Please try again.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported on this platform.";
pub const LOCATION_DENIED: &str = "Location access denied. Please enable location services.";
pub const LOCATION_UNAVAILABLE: &str = "Location information is unavailable.";
pub const LOCATION_TIMEOUT: &str = "Location request timed out.";
pub const LOCATION_FAILED: &str = "Failed to get current location.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub snapshot: Option<Arc<WeatherSnapshot>>,
    pub loading: bool,
    pub error: Option<String>,
    pub unit: TemperatureUnit,
    pub suggestions: Vec<LocationDescriptor>,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetLoading(bool),
    SetSnapshot(WeatherSnapshot),
    SetError(String),
    ClearError,
    ToggleUnit,
    SetSuggestions(Vec<LocationDescriptor>),
    ClearSuggestions,
}

impl DashboardState {
    pub fn with_unit(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SetLoading(loading) => Self { loading, ..self },
            Action::SetSnapshot(snapshot) => Self {
                snapshot: Some(Arc::new(snapshot)),
                loading: false,
                error: None,
                ..self
            },
            Action::SetError(message) => Self {
                error: Some(message),
                loading: false,
                ..self
            },
            Action::ClearError => Self { error: None, ..self },
            Action::ToggleUnit => Self {
                unit: self.unit.toggle(),
                ..self
            },
            Action::SetSuggestions(suggestions) => Self {
                suggestions,
                ..self
            },
            Action::ClearSuggestions => Self {
                suggestions: Vec::new(),
                ..self
            },
        }
    }

    /// Backdrop for the current snapshot, or the default before one loads.
    pub fn backdrop(&self) -> Backdrop {
        match &self.snapshot {
            Some(snap) => Backdrop::select(
                &snap.current.condition.text,
                is_daytime(&snap.location.localtime),
            ),
            None => Backdrop::DEFAULT,
        }
    }
}

/// Drives a [`ForecastService`] on behalf of a front end.
#[derive(Debug)]
pub struct Dashboard {
    service: ForecastService,
    geolocator: Option<Box<dyn Geolocator>>,
    position_options: PositionOptions,
    last_position: Option<Position>,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(service: ForecastService, unit: TemperatureUnit) -> Self {
        Self {
            service,
            geolocator: None,
            position_options: PositionOptions::default(),
            last_position: None,
            state: DashboardState::with_unit(unit),
        }
    }

    pub fn with_geolocator(mut self, geolocator: Box<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    pub fn with_position_options(mut self, options: PositionOptions) -> Self {
        self.position_options = options;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    fn begin_loading(&mut self) {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::ClearError);
    }

    fn finish(&mut self, result: Result<WeatherSnapshot, WeatherError>, message: &str) {
        match result {
            Ok(snapshot) => {
                info!(location = %snapshot.location.display_name(), "Snapshot loaded");
                self.dispatch(Action::SetSnapshot(snapshot));
            }
            Err(e) => {
                warn!(error = %e, "Weather lookup failed");
                self.dispatch(Action::SetError(message.to_string()));
            }
        }
    }

    /// Search by place name and replace the snapshot with the result.
    pub async fn search(&mut self, query: &str) {
        self.begin_loading();
        let result = self.service.weather_for_place(query).await;
        self.finish(result, FETCH_FAILED);
    }

    /// Show the weather at explicit coordinates.
    pub async fn show_coordinates(&mut self, lat: f64, lon: f64) {
        self.begin_loading();
        let result = self.service.weather_for_coordinates(lat, lon).await;
        self.finish(result, FETCH_FAILED);
    }

    /// Show the weather at the user's own position.
    pub async fn locate(&mut self) {
        if self.geolocator.is_none() {
            self.dispatch(Action::SetError(GEOLOCATION_UNSUPPORTED.to_string()));
            return;
        }

        self.begin_loading();

        let position = match self.acquire_position().await {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Could not determine position");
                let message = match e {
                    GeolocationError::PermissionDenied => LOCATION_DENIED,
                    GeolocationError::PositionUnavailable => LOCATION_UNAVAILABLE,
                    GeolocationError::Timeout => LOCATION_TIMEOUT,
                    GeolocationError::UnsupportedEnvironment => GEOLOCATION_UNSUPPORTED,
                };
                self.dispatch(Action::SetError(message.to_string()));
                return;
            }
        };

        let result = self
            .service
            .weather_for_coordinates(position.latitude, position.longitude)
            .await;
        self.finish(result, LOCATION_FAILED);
    }

    async fn acquire_position(&mut self) -> Result<Position, GeolocationError> {
        let options = self.position_options;

        let now = Utc::now();
        if let Some(cached) = self
            .last_position
            .filter(|p| p.is_fresh(now, options.maximum_age))
        {
            return Ok(cached);
        }

        let geolocator = self
            .geolocator
            .as_ref()
            .ok_or(GeolocationError::UnsupportedEnvironment)?;

        let position =
            tokio::time::timeout(options.timeout, geolocator.current_position(&options))
                .await
                .map_err(|_| GeolocationError::Timeout)??;

        self.last_position = Some(position);
        Ok(position)
    }

    /// Refresh autocomplete candidates. Failures simply clear the list.
    pub async fn suggest(&mut self, query: &str) {
        let suggestions = self.service.suggestions(query).await;
        if suggestions.is_empty() {
            self.dispatch(Action::ClearSuggestions);
        } else {
            self.dispatch(Action::SetSuggestions(suggestions));
        }
    }

    pub fn clear_suggestions(&mut self) {
        self.dispatch(Action::ClearSuggestions);
    }

    pub fn toggle_unit(&mut self) {
        self.dispatch(Action::ToggleUnit);
    }
}
