use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::units::TemperatureUnit;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";

/// Base URLs of the two upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: DEFAULT_GEOCODING_URL.to_string(),
            forecast: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Fixed position reported as the user's "current location".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "fahrenheit"
///
/// [home]
/// latitude = 28.6
/// longitude = 77.2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit shown on startup.
    pub units: TemperatureUnit,

    pub endpoints: Endpoints,

    pub home: Option<HomeLocation>,
}

impl Config {
    /// Read the user's config file. Units default to Celsius and endpoints to
    /// Open-Meteo until `forecast configure` has written one.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot read {}", path.display()));
            }
        };

        toml::from_str(&text).with_context(|| {
            format!(
                "{} is not a valid forecast config; fix it or run `forecast configure`",
                path.display()
            )
        })
    }

    /// Write to the platform config path and return where it went.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;

        let text = toml::to_string_pretty(self).context("Config does not serialize to TOML")?;
        fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set the home position, validating WGS84 ranges.
    pub fn set_home(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!(
                "Coordinates out of range: latitude must be -90..90, longitude -180..180"
            ));
        }
        self.home = Some(HomeLocation {
            latitude,
            longitude,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.units, TemperatureUnit::Celsius);
        assert_eq!(cfg.endpoints.geocoding, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.forecast, DEFAULT_FORECAST_URL);
        assert!(cfg.home.is_none());
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            units: TemperatureUnit::Fahrenheit,
            ..Config::default()
        };
        cfg.set_home(28.6, 77.2).unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "units = \"fahrenheit\"\n[endpoints]\nforecast = \"http://localhost:9\"\n")
            .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.units, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.endpoints.forecast, "http://localhost:9");
        assert_eq!(cfg.endpoints.geocoding, DEFAULT_GEOCODING_URL);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "units = [").unwrap();

        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains(&path.display().to_string()), "{err}");
        assert!(err.contains("forecast configure"), "{err}");
    }

    #[test]
    fn set_home_rejects_out_of_range() {
        let mut cfg = Config::default();
        assert!(cfg.set_home(91.0, 0.0).is_err());
        assert!(cfg.set_home(0.0, -181.0).is_err());
        assert!(cfg.home.is_none());
        assert!(cfg.set_home(-90.0, 180.0).is_ok());
    }
}
