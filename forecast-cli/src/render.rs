//! Human-friendly rendering of a snapshot.

use std::fmt::{self, Write};

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use forecast_core::{Backdrop, HourlyEntry, LocationDescriptor, TemperatureUnit, WeatherSnapshot};
use serde::Serialize;

const STRIP_HOURS: usize = 24;

/// JSON output: the snapshot plus what the text dashboard derives from it.
#[derive(Debug, Serialize)]
pub struct JsonView<'a> {
    pub unit: TemperatureUnit,
    pub backdrop: String,
    pub is_day: bool,
    pub next_hours: Vec<&'a HourlyEntry>,
    pub snapshot: &'a WeatherSnapshot,
}

impl<'a> JsonView<'a> {
    pub fn new(snapshot: &'a WeatherSnapshot, unit: TemperatureUnit, backdrop: Backdrop) -> Self {
        Self {
            unit,
            backdrop: backdrop.to_string(),
            is_day: forecast_core::backdrop::is_daytime(&snapshot.location.localtime),
            next_hours: snapshot.next_hours(STRIP_HOURS),
            snapshot,
        }
    }
}

fn parse_local(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok()
}

fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// "12 AM", "1 AM" … "12 PM", "1 PM" …
pub fn hour_label(time: &str) -> String {
    let Some(hour) = parse_local(time).map(|t| t.hour()) else {
        return time.to_string();
    };
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{h} AM"),
    }
}

/// "Today", "Tomorrow", or the weekday name, relative to `today`.
pub fn day_label(date: &str, today: Option<NaiveDate>) -> String {
    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };
    match today {
        Some(today) if day == today => "Today".to_string(),
        Some(today) if today.checked_add_days(Days::new(1)) == Some(day) => {
            "Tomorrow".to_string()
        }
        _ => day.format("%A").to_string(),
    }
}

pub fn dashboard(
    snapshot: &WeatherSnapshot,
    unit: TemperatureUnit,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let loc = &snapshot.location;
    let cur = &snapshot.current;
    let t = unit.temperature_symbol();
    let local = parse_local(&loc.localtime);

    writeln!(out, "{}  ({:.2}°, {:.2}°)", loc.display_name(), loc.lat, loc.lon)?;
    if let Some(local) = local {
        writeln!(out, "{}", local.format("%A, %B %-d, %Y  %-I:%M %p"))?;
    }
    out.push('\n');

    writeln!(out, "{}  {}", cur.condition.icon, cur.condition.text)?;
    writeln!(
        out,
        "  {}{t}  feels like {}{t}",
        whole(cur.temperature.in_unit(unit)),
        whole(cur.feels_like.in_unit(unit)),
    )?;
    writeln!(
        out,
        "  Wind {} {} {}   Humidity {}%   Visibility {} {}",
        whole(cur.wind.in_unit(unit)),
        unit.speed_symbol(),
        cur.wind_dir,
        cur.humidity_pct,
        whole(cur.visibility.in_unit(unit)),
        unit.distance_symbol(),
    )?;
    writeln!(
        out,
        "  Pressure {} mb   Cloud {}%   Precip {:.1} mm   UV {}",
        whole(cur.pressure_mb),
        cur.cloud_pct,
        cur.precip_mm,
        cur.uv,
    )?;

    let strip = snapshot.next_hours(STRIP_HOURS);
    if !strip.is_empty() {
        out.push_str("\nNext 24 hours\n");
        for (i, hour) in strip.iter().enumerate() {
            let label = if i == 0 {
                "Now".to_string()
            } else {
                hour_label(&hour.time)
            };
            let rain = if hour.chance_of_rain > 0 {
                format!("  {}%", hour.chance_of_rain)
            } else {
                String::new()
            };
            writeln!(
                out,
                "  {label:<6} {}  {}{t}{rain}",
                hour.condition.icon,
                whole(hour.temperature.in_unit(unit)),
            )?;
        }
    }

    if !snapshot.days.is_empty() {
        writeln!(out, "\n{}-day forecast", snapshot.days.len())?;
        let today = local.map(|l| l.date());
        for day in &snapshot.days {
            let rain = if day.chance_of_rain > 0 {
                format!("   {}% chance of rain", day.chance_of_rain)
            } else {
                String::new()
            };
            writeln!(
                out,
                "  {:<10} {}  {:<24} {}{t} / {}{t}   wind {} {}{rain}",
                day_label(&day.date, today),
                day.condition.icon,
                day.condition.text,
                whole(day.max_temperature.in_unit(unit)),
                whole(day.min_temperature.in_unit(unit)),
                whole(day.max_wind.in_unit(unit)),
                unit.speed_symbol(),
            )?;
        }
    }

    Ok(out)
}

pub fn suggestions(list: &[LocationDescriptor]) -> Result<String, fmt::Error> {
    if list.is_empty() {
        return Ok("No matching places.\n".to_string());
    }
    let mut out = String::new();
    for (i, loc) in list.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {}  ({:.4},{:.4})",
            i + 1,
            loc.display_name(),
            loc.lat,
            loc.lon
        )?;
    }
    Ok(out)
}
