use serde::{Deserialize, Serialize};

/// A provider weather code together with its description and pictogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCode {
    pub code: i32,
    pub text: String,
    pub icon: String,
}

/// Description and icon for a WMO weather code.
///
/// See <https://open-meteo.com/en/docs> (WMO Weather interpretation codes).
/// Codes outside the table map to `("Unknown", "❓")`.
pub fn describe(code: i32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌧️"),
        56 => ("Light freezing drizzle", "🌨️"),
        57 => ("Dense freezing drizzle", "🌨️"),
        61 => ("Slight rain", "🌦️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        66 => ("Light freezing rain", "🌨️"),
        67 => ("Heavy freezing rain", "🌨️"),
        71 => ("Slight snow fall", "🌨️"),
        73 => ("Moderate snow fall", "❄️"),
        75 => ("Heavy snow fall", "❄️"),
        77 => ("Snow grains", "🌨️"),
        80 => ("Slight rain showers", "🌦️"),
        81 => ("Moderate rain showers", "🌧️"),
        82 => ("Violent rain showers", "⛈️"),
        85 => ("Slight snow showers", "🌨️"),
        86 => ("Heavy snow showers", "❄️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with slight hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => ("Unknown", "❓"),
    }
}

pub fn resolve_condition(code: i32) -> ConditionCode {
    let (text, icon) = describe(code);
    ConditionCode {
        code,
        text: text.to_string(),
        icon: icon.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [i32; 28] = [
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn clear_sky() {
        let c = resolve_condition(0);
        assert_eq!(c.code, 0);
        assert_eq!(c.text, "Clear sky");
        assert_eq!(c.icon, "☀️");
    }

    #[test]
    fn known_codes_have_descriptions() {
        for code in KNOWN {
            assert_ne!(describe(code).0, "Unknown", "code {code}");
        }
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in (-50..200).filter(|c| !KNOWN.contains(c)) {
            let c = resolve_condition(code);
            assert_eq!(c.text, "Unknown", "code {code}");
            assert_eq!(c.icon, "❓", "code {code}");
            assert_eq!(c.code, code);
        }
        assert_eq!(describe(i32::MAX), ("Unknown", "❓"));
        assert_eq!(describe(i32::MIN), ("Unknown", "❓"));
    }

    #[test]
    fn thunderstorm_family() {
        assert_eq!(describe(95).0, "Thunderstorm");
        assert_eq!(describe(99).0, "Thunderstorm with heavy hail");
        assert_eq!(describe(82).1, "⛈️");
    }
}
