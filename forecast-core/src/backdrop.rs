//! Backdrop selection from the current condition and time of day.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// A three-stop gradient, expressed as palette tokens
/// (`from-blue-400 via-blue-500 to-blue-600`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Backdrop {
    pub from: &'static str,
    pub via: &'static str,
    pub to: &'static str,
}

const fn stops(from: &'static str, via: &'static str, to: &'static str) -> Backdrop {
    Backdrop { from, via, to }
}

const DAY_CLEAR: Backdrop = stops("blue-400", "blue-500", "blue-600");
const NIGHT_CLEAR: Backdrop = stops("indigo-900", "purple-900", "indigo-800");

impl Backdrop {
    /// Shown before any forecast has loaded.
    pub const DEFAULT: Backdrop = DAY_CLEAR;

    /// Pick a backdrop by keyword match on the condition description.
    /// Rules are checked in order; the first hit wins.
    pub fn select(condition_text: &str, is_day: bool) -> Self {
        let text = condition_text.to_lowercase();

        if !is_day {
            return if mentions(&text, &["clear"]) {
                NIGHT_CLEAR
            } else if mentions(&text, &["cloud", "overcast"]) {
                stops("gray-800", "gray-700", "gray-900")
            } else if mentions(&text, &["rain", "drizzle"]) {
                stops("gray-900", "blue-900", "gray-800")
            } else if mentions(&text, &["snow", "blizzard"]) {
                stops("gray-700", "blue-800", "gray-900")
            } else if mentions(&text, &["thunder", "storm"]) {
                stops("gray-900", "purple-900", "black")
            } else {
                NIGHT_CLEAR
            };
        }

        if mentions(&text, &["clear", "sunny"]) {
            DAY_CLEAR
        } else if mentions(&text, &["partly", "mainly"]) {
            stops("blue-400", "blue-500", "gray-500")
        } else if mentions(&text, &["cloudy", "overcast"]) {
            stops("gray-400", "gray-500", "gray-600")
        } else if mentions(&text, &["rain", "drizzle"]) {
            stops("gray-500", "blue-600", "gray-700")
        } else if mentions(&text, &["snow", "blizzard"]) {
            stops("gray-300", "blue-400", "gray-500")
        } else if mentions(&text, &["thunder", "storm"]) {
            stops("gray-700", "purple-700", "gray-800")
        } else if mentions(&text, &["fog", "mist"]) {
            stops("gray-400", "gray-300", "gray-500")
        } else {
            DAY_CLEAR
        }
    }
}

impl std::fmt::Display for Backdrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "from-{} via-{} to-{}", self.from, self.via, self.to)
    }
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Daytime is 06:00 up to (not including) 18:00 local time. Unparseable
/// timestamps count as daytime.
pub fn is_daytime(localtime: &str) -> bool {
    NaiveDateTime::parse_from_str(localtime, "%Y-%m-%dT%H:%M")
        .map(|t| (6..18).contains(&t.hour()))
        .unwrap_or(true)
}
