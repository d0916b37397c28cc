use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{WeatherError, config::Endpoints};

use super::WeatherProvider;

/// Days of forecast requested from the provider.
pub const FORECAST_DAYS: u8 = 5;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation,weather_code,cloud_cover,surface_pressure,wind_speed_10m,wind_direction_10m,\
wind_gusts_10m";

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation_probability,weather_code,wind_speed_10m,wind_direction_10m";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
precipitation_sum,precipitation_probability_max,wind_speed_10m_max";

const GEOCODING: &str = "Geocoding";
const FORECAST: &str = "Forecast";

/// Client for the keyless Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoints: Endpoints,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            http: Client::new(),
        }
    }

    async fn get_json<T, Q>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &Q,
    ) -> Result<T, WeatherError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(%url, "Sending {endpoint} request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::service(endpoint, e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::service(endpoint, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            warn!(%status, "{endpoint} request rejected");
            return Err(WeatherError::service(
                endpoint,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    name: &'a str,
    count: u8,
    language: &'a str,
    format: &'a str,
}

#[derive(Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    current: &'a str,
    hourly: &'a str,
    daily: &'a str,
    timezone: &'a str,
    forecast_days: u8,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Omitted entirely by the API when nothing matches.
    #[serde(default)]
    results: Vec<GeoMatch>,
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub current: CurrentSeries,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentSeries {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: u8,
    pub apparent_temperature: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub cloud_cover: u8,
    pub surface_pressure: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<u8>,
    pub apparent_temperature: Vec<f64>,
    /// `null` where the model has no probability for that hour.
    pub precipitation_probability: Vec<Option<u8>>,
    pub weather_code: Vec<i32>,
    pub wind_speed_10m: Vec<f64>,
    pub wind_direction_10m: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<u8>>,
    pub wind_speed_10m_max: Vec<f64>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn search(&self, name: &str, count: u8) -> Result<Vec<GeoMatch>, WeatherError> {
        let url = format!("{}/search", self.endpoints.geocoding.trim_end_matches('/'));
        let query = SearchQuery {
            name,
            count,
            language: "en",
            format: "json",
        };

        let parsed: SearchResponse = self.get_json(GEOCODING, &url, &query).await?;
        debug!(matches = parsed.results.len(), "Geocoding finished");
        Ok(parsed.results)
    }

    #[instrument(skip(self))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/forecast", self.endpoints.forecast.trim_end_matches('/'));
        let query = ForecastQuery {
            latitude: lat,
            longitude: lon,
            current: CURRENT_FIELDS,
            hourly: HOURLY_FIELDS,
            daily: DAILY_FIELDS,
            timezone: "auto",
            forecast_days: FORECAST_DAYS,
        };

        self.get_json(FORECAST, &url, &query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn search_response_without_results_is_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"generationtime_ms":0.4}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn geo_match_tolerates_missing_optional_fields() {
        let parsed: SearchResponse = serde_json::from_str(
            r#"{"results":[{"name":"Paris","latitude":48.8566,"longitude":2.3522}]}"#,
        )
        .unwrap();
        let m = &parsed.results[0];
        assert_eq!(m.name, "Paris");
        assert_eq!(m.country, "");
        assert!(m.admin1.is_none());
    }

    #[test]
    fn probability_series_accept_nulls() {
        let hourly: HourlySeries = serde_json::from_str(
            r#"{"time":["2024-07-01T00:00","2024-07-01T01:00"],
                "temperature_2m":[20.0,19.5],"relative_humidity_2m":[60,61],
                "apparent_temperature":[19.0,18.8],"precipitation_probability":[null,10],
                "weather_code":[0,1],"wind_speed_10m":[8.0,7.5],"wind_direction_10m":[250,245]}"#,
        )
        .unwrap();
        assert_eq!(hourly.precipitation_probability, vec![None, Some(10)]);

        let daily: DailySeries = serde_json::from_str(
            r#"{"time":["2024-07-01"],"weather_code":[3],"temperature_2m_max":[26.0],
                "temperature_2m_min":[14.0],"precipitation_sum":[null],
                "precipitation_probability_max":[null],"wind_speed_10m_max":[15.0]}"#,
        )
        .unwrap();
        assert_eq!(daily.precipitation_sum, vec![None]);
        assert_eq!(daily.precipitation_probability_max, vec![None]);
    }

    #[test]
    fn selectors_cover_every_series_we_read() {
        for field in ["temperature_2m", "weather_code", "wind_direction_10m", "surface_pressure"] {
            assert!(CURRENT_FIELDS.split(',').any(|f| f == field), "{field}");
        }
        assert!(HOURLY_FIELDS.split(',').any(|f| f == "precipitation_probability"));
        assert!(DAILY_FIELDS.split(',').any(|f| f == "precipitation_probability_max"));
        assert!(!CURRENT_FIELDS.contains(' '));
    }
}
