use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use forecast_core::{
    Config, Dashboard, FixedGeolocator, ForecastService, TemperatureUnit,
    geocode::parse_coordinates,
};

use crate::{configure, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Units to display; defaults to the configured units.
    #[arg(long, global = true, value_enum)]
    pub units: Option<UnitsArg>,

    /// Print the result as JSON instead of a dashboard.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for TemperatureUnit {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Celsius => TemperatureUnit::Celsius,
            UnitsArg::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a place name or a "lat,lon" pair.
    Show {
        /// City name, e.g. "Paris", or coordinates such as "28.6,77.2".
        location: String,
    },

    /// Show weather at the configured home position.
    Here,

    /// List places matching a partial name.
    Suggest {
        /// At least three characters of a place name.
        query: String,
    },

    /// Interactively set units and home position.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Command::Configure = self.command {
            return configure::run(config_to_edit(Config::load()));
        }

        let config = Config::load().context("Failed to load configuration")?;

        let unit = self.units.map(TemperatureUnit::from).unwrap_or(config.units);
        tracing::debug!(%unit, home = ?config.home, "configuration loaded");
        let mut dashboard = Dashboard::new(ForecastService::from_config(&config), unit);
        if let Some(home) = config.home {
            dashboard = dashboard.with_geolocator(Box::new(FixedGeolocator::new(home)));
        }

        match self.command {
            // handled before the config is loaded
            Command::Configure => return Ok(()),
            Command::Show { location } => match parse_coordinates(&location) {
                Some((lat, lon)) => dashboard.show_coordinates(lat, lon).await,
                None => dashboard.search(&location).await,
            },
            Command::Here => dashboard.locate().await,
            Command::Suggest { query } => {
                dashboard.suggest(&query).await;
                let suggestions = &dashboard.state().suggestions;
                if self.json {
                    println!("{}", serde_json::to_string_pretty(suggestions)?);
                } else {
                    print!("{}", render::suggestions(suggestions)?);
                }
                return Ok(());
            }
        }

        let state = dashboard.state();
        if let Some(message) = &state.error {
            bail!("{message}");
        }

        let Some(snapshot) = &state.snapshot else {
            bail!("Search for a city or configure a home position to get a forecast.");
        };

        if self.json {
            let view = render::JsonView::new(snapshot, state.unit, state.backdrop());
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            print!("{}", render::dashboard(snapshot, state.unit)?);
        }

        Ok(())
    }
}

/// `configure` must still start when the existing file is unreadable, since
/// it is the command that rewrites it.
fn config_to_edit(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|e| {
        tracing::warn!(error = ?e, "Ignoring unreadable configuration");
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::HomeLocation;

    #[test]
    fn configure_starts_from_defaults_when_config_is_broken() {
        let cfg = config_to_edit(Err(anyhow::anyhow!("Failed to parse config file")));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn configure_edits_the_loaded_config() {
        let loaded = Config {
            units: TemperatureUnit::Fahrenheit,
            home: Some(HomeLocation {
                latitude: 28.6,
                longitude: 77.2,
            }),
            ..Config::default()
        };

        assert_eq!(config_to_edit(Ok(loaded.clone())), loaded);
    }

    #[test]
    fn units_flag_maps_onto_display_unit() {
        let cli = Cli::parse_from(["forecast", "--units", "fahrenheit", "show", "Paris"]);
        assert_eq!(
            cli.units.map(TemperatureUnit::from),
            Some(TemperatureUnit::Fahrenheit)
        );
        assert!(matches!(cli.command, Command::Show { ref location } if location == "Paris"));
    }
}
