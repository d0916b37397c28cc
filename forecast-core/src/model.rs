use serde::{Deserialize, Serialize};

use crate::condition::ConditionCode;
use crate::units::{Distance, Speed, Temperature};

/// Name used for locations resolved from raw coordinates.
pub const UNNAMED_LOCATION: &str = "Your Location";

/// Open-Meteo does not report these; consumers get fixed values instead of gaps.
pub const DEFAULT_VISIBILITY: Distance = Distance {
    km: 10.0,
    miles: 6.2,
};
pub const DEFAULT_UV_INDEX: f64 = 5.0;
pub const DEFAULT_DAILY_HUMIDITY: u8 = 65;

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    pub name: String,
    /// Empty when unknown.
    pub country: String,
    /// First-level administrative area; empty when unknown.
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    /// Local wall-clock time as reported by the forecast provider,
    /// `YYYY-MM-DDTHH:MM`. Empty until a forecast has been fetched.
    pub localtime: String,
}

impl LocationDescriptor {
    /// "Name, Region, Country", skipping empty parts.
    pub fn display_name(&self) -> String {
        [&self.name, &self.region, &self.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Temperature,
    pub feels_like: Temperature,
    pub wind: Speed,
    pub wind_dir: String,
    pub humidity_pct: u8,
    pub cloud_pct: u8,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub visibility: Distance,
    pub uv: f64,
    pub condition: ConditionCode,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature: Temperature,
    pub feels_like: Temperature,
    pub wind: Speed,
    pub wind_dir: String,
    pub humidity_pct: u8,
    pub condition: ConditionCode,
    pub chance_of_rain: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    pub max_temperature: Temperature,
    pub min_temperature: Temperature,
    pub max_wind: Speed,
    pub condition: ConditionCode,
    pub total_precip_mm: f64,
    pub avg_humidity_pct: u8,
    pub chance_of_rain: u8,
    pub uv: f64,
    pub hours: Vec<HourlyEntry>,
}

/// Fully normalized forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: LocationDescriptor,
    pub current: CurrentConditions,
    pub days: Vec<DailyEntry>,
}

impl WeatherSnapshot {
    /// Up to `count` hourly entries starting at the location's current local
    /// hour, continuing into the following days.
    pub fn next_hours(&self, count: usize) -> Vec<&HourlyEntry> {
        // Provider timestamps are zero-padded ISO strings, so lexical order is
        // chronological order.
        let hour_prefix = self.location.localtime.get(..13).unwrap_or_default();
        self.days
            .iter()
            .flat_map(|day| day.hours.iter())
            .skip_while(|hour| hour.time.as_str() < hour_prefix)
            .take(count)
            .collect()
    }
}
