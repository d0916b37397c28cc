use anyhow::Context;
use forecast_core::{Config, TemperatureUnit};
use inquire::{Confirm, CustomType, Select};

/// Interactive `configure` command: pick default units and an optional home
/// position, then write the config file.
pub fn run(mut config: Config) -> anyhow::Result<()> {
    let units = [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let cursor = units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Default units:", units.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Unit selection cancelled")?;

    let wants_home = Confirm::new("Set a home position for `forecast here`?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Prompt cancelled")?;

    if wants_home {
        let current = config.home;
        let mut latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 28.6");
        let mut longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 77.2");
        if let Some(home) = current {
            latitude = latitude.with_default(home.latitude);
            longitude = longitude.with_default(home.longitude);
        }

        let lat = latitude.prompt().context("Latitude prompt cancelled")?;
        let lon = longitude.prompt().context("Longitude prompt cancelled")?;
        config.set_home(lat, lon)?;
    } else {
        config.home = None;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
