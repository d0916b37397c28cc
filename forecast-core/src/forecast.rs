//! Conversion of raw provider series into a [`WeatherSnapshot`].

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    WeatherError,
    condition::resolve_condition,
    model::{
        CurrentConditions, DEFAULT_DAILY_HUMIDITY, DEFAULT_UV_INDEX, DEFAULT_VISIBILITY,
        DailyEntry, HourlyEntry, LocationDescriptor, WeatherSnapshot,
    },
    provider::{CurrentSeries, DailySeries, ForecastResponse, HourlySeries, WeatherProvider},
    units::{Speed, Temperature, compass_label},
};

#[derive(Debug, Clone)]
pub struct ForecastNormalizer {
    provider: Arc<dyn WeatherProvider>,
}

impl ForecastNormalizer {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the forecast for `lat`/`lon` and normalize it for `location`.
    #[instrument(skip(self, location), fields(name = %location.name))]
    pub async fn fetch_and_normalize(
        &self,
        lat: f64,
        lon: f64,
        location: &LocationDescriptor,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let raw = self.provider.forecast(lat, lon).await?;
        let snapshot = normalize(raw, location)?;
        debug!(days = snapshot.days.len(), "Forecast normalized");
        Ok(snapshot)
    }
}

/// Pure transform from one provider response to the internal model.
///
/// Identity fields (name, country, region) come from `location`; the grid
/// coordinates, timezone and local time come from the response.
pub fn normalize(
    raw: ForecastResponse,
    location: &LocationDescriptor,
) -> Result<WeatherSnapshot, WeatherError> {
    check_hourly(&raw.hourly)?;
    check_daily(&raw.daily)?;

    let current = current_conditions(&raw.current);
    let hours = hourly_entries(&raw.hourly);
    let days = daily_entries(&raw.daily, &hours);

    Ok(WeatherSnapshot {
        location: LocationDescriptor {
            name: location.name.clone(),
            country: location.country.clone(),
            region: location.region.clone(),
            lat: raw.latitude,
            lon: raw.longitude,
            timezone: raw.timezone,
            localtime: raw.current.time,
        },
        current,
        days,
    })
}

fn current_conditions(c: &CurrentSeries) -> CurrentConditions {
    CurrentConditions {
        temperature: Temperature::from_celsius(c.temperature_2m),
        feels_like: Temperature::from_celsius(c.apparent_temperature),
        wind: Speed::from_kph(c.wind_speed_10m),
        wind_dir: compass_label(c.wind_direction_10m).to_string(),
        humidity_pct: c.relative_humidity_2m,
        cloud_pct: c.cloud_cover,
        pressure_mb: c.surface_pressure,
        precip_mm: c.precipitation,
        visibility: DEFAULT_VISIBILITY,
        uv: DEFAULT_UV_INDEX,
        condition: resolve_condition(c.weather_code),
        time: c.time.clone(),
    }
}

fn hourly_entries(h: &HourlySeries) -> Vec<HourlyEntry> {
    h.time
        .iter()
        .enumerate()
        .map(|(i, time)| HourlyEntry {
            time: time.clone(),
            temperature: Temperature::from_celsius(h.temperature_2m[i]),
            feels_like: Temperature::from_celsius(h.apparent_temperature[i]),
            wind: Speed::from_kph(h.wind_speed_10m[i]),
            wind_dir: compass_label(h.wind_direction_10m[i]).to_string(),
            humidity_pct: h.relative_humidity_2m[i],
            condition: resolve_condition(h.weather_code[i]),
            chance_of_rain: h.precipitation_probability[i].unwrap_or(0),
        })
        .collect()
}

/// Each day owns the hours whose timestamp starts with its date string.
///
/// This is a plain prefix match, not an interval check: it relies on the
/// provider reporting hourly timestamps in the location's own timezone, which
/// `timezone=auto` guarantees for Open-Meteo.
fn daily_entries(d: &DailySeries, hours: &[HourlyEntry]) -> Vec<DailyEntry> {
    d.time
        .iter()
        .enumerate()
        .map(|(i, date)| DailyEntry {
            date: date.clone(),
            max_temperature: Temperature::from_celsius(d.temperature_2m_max[i]),
            min_temperature: Temperature::from_celsius(d.temperature_2m_min[i]),
            max_wind: Speed::from_kph(d.wind_speed_10m_max[i]),
            condition: resolve_condition(d.weather_code[i]),
            total_precip_mm: d.precipitation_sum[i].unwrap_or(0.0),
            avg_humidity_pct: DEFAULT_DAILY_HUMIDITY,
            chance_of_rain: d.precipitation_probability_max[i].unwrap_or(0),
            uv: DEFAULT_UV_INDEX,
            hours: hours
                .iter()
                .filter(|hour| hour.time.starts_with(date.as_str()))
                .cloned()
                .collect(),
        })
        .collect()
}

fn check_len(series: &'static str, expected: usize, actual: usize) -> Result<(), WeatherError> {
    if expected != actual {
        return Err(WeatherError::InconsistentSeries {
            series,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_hourly(h: &HourlySeries) -> Result<(), WeatherError> {
    let n = h.time.len();
    check_len("hourly.temperature_2m", n, h.temperature_2m.len())?;
    check_len("hourly.relative_humidity_2m", n, h.relative_humidity_2m.len())?;
    check_len("hourly.apparent_temperature", n, h.apparent_temperature.len())?;
    check_len("hourly.precipitation_probability", n, h.precipitation_probability.len())?;
    check_len("hourly.weather_code", n, h.weather_code.len())?;
    check_len("hourly.wind_speed_10m", n, h.wind_speed_10m.len())?;
    check_len("hourly.wind_direction_10m", n, h.wind_direction_10m.len())
}

fn check_daily(d: &DailySeries) -> Result<(), WeatherError> {
    let n = d.time.len();
    check_len("daily.weather_code", n, d.weather_code.len())?;
    check_len("daily.temperature_2m_max", n, d.temperature_2m_max.len())?;
    check_len("daily.temperature_2m_min", n, d.temperature_2m_min.len())?;
    check_len("daily.precipitation_sum", n, d.precipitation_sum.len())?;
    check_len("daily.precipitation_probability_max", n, d.precipitation_probability_max.len())?;
    check_len("daily.wind_speed_10m_max", n, d.wind_speed_10m_max.len())
}
