//! Unit conversion and the paired metric/imperial value types.
//!
//! Only the metric value is ever taken from the provider; the imperial half of
//! each pair is derived here so both always agree.

use serde::{Deserialize, Serialize};

const MPH_PER_KPH: f64 = 0.621371;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn to_mph(kph: f64) -> f64 {
    kph * MPH_PER_KPH
}

/// 16-point compass label for a bearing in degrees.
///
/// Rounds half up like the bearing buckets are usually drawn, and wraps
/// negative or >360 bearings back onto the rose.
pub fn compass_label(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5 + 0.5).floor() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

/// Display unit chosen by the user. The temperature toggle also switches
/// speeds and distances between metric and imperial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub fn speed_symbol(self) -> &'static str {
        match self {
            Self::Celsius => "km/h",
            Self::Fahrenheit => "mph",
        }
    }

    pub fn distance_symbol(self) -> &'static str {
        match self {
            Self::Celsius => "km",
            Self::Fahrenheit => "mi",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: to_fahrenheit(celsius),
        }
    }

    pub fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub kph: f64,
    pub mph: f64,
}

impl Speed {
    pub fn from_kph(kph: f64) -> Self {
        Self {
            kph,
            mph: to_mph(kph),
        }
    }

    pub fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.kph,
            TemperatureUnit::Fahrenheit => self.mph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub km: f64,
    pub miles: f64,
}

impl Distance {
    pub fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.km,
            TemperatureUnit::Fahrenheit => self.miles,
        }
    }
}
