//! Place-name and coordinate resolution.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};

use crate::{
    WeatherError,
    model::{LocationDescriptor, UNNAMED_LOCATION},
    provider::{GeoMatch, WeatherProvider},
};

/// Queries shorter than this (in characters) never reach the upstream
/// suggestion search.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 3;
pub const MAX_SUGGESTIONS: u8 = 10;

/// Axis-aligned box used to attribute a country to raw coordinates.
#[derive(Debug, Clone, Copy)]
struct GeoFence {
    country: &'static str,
    lat: (f64, f64),
    lon: (f64, f64),
}

impl GeoFence {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat.0..=self.lat.1).contains(&lat) && (self.lon.0..=self.lon.1).contains(&lon)
    }
}

// Heuristic only: the box also covers parts of neighbouring countries.
const GEOFENCES: &[GeoFence] = &[GeoFence {
    country: "India",
    lat: (6.5, 37.1),
    lon: (68.7, 97.25),
}];

#[derive(Debug, Clone)]
pub struct Geocoder {
    provider: Arc<dyn WeatherProvider>,
}

impl Geocoder {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Best match for a free-text place name.
    #[instrument(skip(self))]
    pub async fn resolve_by_name(&self, query: &str) -> Result<LocationDescriptor, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound {
                query: query.to_string(),
            });
        }

        let best = self
            .provider
            .search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound {
                query: query.to_string(),
            })?;

        let location = descriptor_from_match(best);
        info!(name = %location.name, country = %location.country, "Resolved location");
        Ok(location)
    }

    /// Autocomplete candidates. Never fails: any upstream problem yields an
    /// empty list.
    pub async fn resolve_suggestions(&self, query: &str) -> Vec<LocationDescriptor> {
        if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
            return Vec::new();
        }

        match self.provider.search(query, MAX_SUGGESTIONS).await {
            Ok(matches) => matches.into_iter().map(descriptor_from_match).collect(),
            Err(e) => {
                debug!(error = %e, "Suggestion lookup failed");
                Vec::new()
            }
        }
    }

    /// Describe raw coordinates without a reverse-geocoding call.
    ///
    /// The name is always [`UNNAMED_LOCATION`]; the country comes from a
    /// bounding-box check and is empty outside the known boxes.
    pub fn resolve_by_coordinates(lat: f64, lon: f64) -> LocationDescriptor {
        let country = GEOFENCES
            .iter()
            .find(|fence| fence.contains(lat, lon))
            .map(|fence| fence.country)
            .unwrap_or_default();

        LocationDescriptor {
            name: UNNAMED_LOCATION.to_string(),
            country: country.to_string(),
            region: String::new(),
            lat,
            lon,
            timezone: String::new(),
            localtime: String::new(),
        }
    }
}

fn descriptor_from_match(m: GeoMatch) -> LocationDescriptor {
    LocationDescriptor {
        name: m.name,
        country: m.country,
        region: m.admin1.or(m.admin2).unwrap_or_default(),
        lat: m.latitude,
        lon: m.longitude,
        timezone: m.timezone.unwrap_or_default(),
        localtime: String::new(),
    }
}

/// Parse a "latitude,longitude" pair.
///
/// Returns `None` if the string isn't a coordinate pair or is outside WGS84
/// ranges, so the caller can treat it as a place name instead.
pub fn parse_coordinates(s: &str) -> Option<(f64, f64)> {
    static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r#"(?x)
            ^
            \s*
            ([-+]?\d+(?:\.\d+)?)   # latitude
            \s*,\s*
            ([-+]?\d+(?:\.\d+)?)   # longitude
            \s*
            $
        "#,
        )
        .expect("coordinate pattern is valid")
    });

    let caps = COORD_RE.captures(s)?;
    let lat: f64 = caps[1].parse().ok()?;
    let lon: f64 = caps[2].parse().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ForecastResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every search and answers with a canned result.
    #[derive(Debug, Default)]
    struct StubProvider {
        matches: Vec<GeoMatch>,
        fail: bool,
        calls: Mutex<Vec<(String, u8)>>,
    }

    impl StubProvider {
        fn calls(&self) -> Vec<(String, u8)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn search(&self, name: &str, count: u8) -> Result<Vec<GeoMatch>, WeatherError> {
            self.calls.lock().unwrap().push((name.to_string(), count));
            if self.fail {
                return Err(WeatherError::service("Geocoding", "status 503"));
            }
            Ok(self.matches.iter().take(count as usize).cloned().collect())
        }

        async fn forecast(&self, _lat: f64, _lon: f64) -> Result<ForecastResponse, WeatherError> {
            unreachable!("geocoder never fetches forecasts")
        }
    }

    fn paris() -> GeoMatch {
        GeoMatch {
            name: "Paris".into(),
            latitude: 48.8566,
            longitude: 2.3522,
            country: "France".into(),
            admin1: Some("Île-de-France".into()),
            admin2: None,
            timezone: Some("Europe/Paris".into()),
        }
    }

    fn geocoder(stub: StubProvider) -> (Geocoder, Arc<StubProvider>) {
        let stub = Arc::new(stub);
        (Geocoder::new(stub.clone()), stub)
    }

    #[tokio::test]
    async fn resolve_by_name_takes_first_match() {
        let (geo, stub) = geocoder(StubProvider {
            matches: vec![paris()],
            ..Default::default()
        });

        let loc = geo.resolve_by_name("  Paris ").await.unwrap();
        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.country, "France");
        assert_eq!(loc.region, "Île-de-France");
        assert_eq!(loc.lat, 48.8566);
        assert_eq!(loc.lon, 2.3522);
        assert_eq!(stub.calls(), vec![("Paris".to_string(), 1)]);
    }

    #[tokio::test]
    async fn region_falls_back_to_admin2() {
        let (geo, _) = geocoder(StubProvider {
            matches: vec![GeoMatch {
                admin1: None,
                admin2: Some("Paris".into()),
                ..paris()
            }],
            ..Default::default()
        });

        let loc = geo.resolve_by_name("Paris").await.unwrap();
        assert_eq!(loc.region, "Paris");
    }

    #[tokio::test]
    async fn resolve_by_name_without_match_is_not_found() {
        let (geo, _) = geocoder(StubProvider::default());
        let err = geo.resolve_by_name("Nowhereville123").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound { ref query } if query == "Nowhereville123"));
    }

    #[tokio::test]
    async fn resolve_by_name_propagates_service_errors() {
        let (geo, _) = geocoder(StubProvider {
            fail: true,
            ..Default::default()
        });
        let err = geo.resolve_by_name("Paris").await.unwrap_err();
        assert!(err.is_service_error());
    }

    #[tokio::test]
    async fn blank_query_never_goes_upstream() {
        let (geo, stub) = geocoder(StubProvider::default());
        assert!(matches!(
            geo.resolve_by_name("   ").await,
            Err(WeatherError::NotFound { .. })
        ));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn short_suggestion_queries_are_not_sent() {
        let (geo, stub) = geocoder(StubProvider {
            matches: vec![paris()],
            ..Default::default()
        });

        for q in ["", "P", "Pa", "Åö"] {
            assert!(geo.resolve_suggestions(q).await.is_empty());
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn suggestions_ask_for_ten() {
        let (geo, stub) = geocoder(StubProvider {
            matches: vec![paris(), paris()],
            ..Default::default()
        });

        let found = geo.resolve_suggestions("Par").await;
        assert_eq!(found.len(), 2);
        assert_eq!(stub.calls(), vec![("Par".to_string(), MAX_SUGGESTIONS)]);
    }

    #[tokio::test]
    async fn suggestions_swallow_errors() {
        let (geo, stub) = geocoder(StubProvider {
            fail: true,
            ..Default::default()
        });
        assert!(geo.resolve_suggestions("Paris").await.is_empty());
        assert_eq!(stub.calls().len(), 1);
    }

    #[test]
    fn coordinates_inside_india() {
        let loc = Geocoder::resolve_by_coordinates(28.6, 77.2);
        assert_eq!(loc.name, "Your Location");
        assert_eq!(loc.country, "India");
        assert_eq!(loc.region, "");
        assert_eq!((loc.lat, loc.lon), (28.6, 77.2));
    }

    #[test]
    fn coordinates_outside_known_boxes() {
        let loc = Geocoder::resolve_by_coordinates(48.8566, 2.3522);
        assert_eq!(loc.name, "Your Location");
        assert_eq!(loc.country, "");
    }

    #[test]
    fn geofence_edges_are_inclusive() {
        assert_eq!(Geocoder::resolve_by_coordinates(6.5, 68.7).country, "India");
        assert_eq!(Geocoder::resolve_by_coordinates(37.1, 97.25).country, "India");
        assert_eq!(Geocoder::resolve_by_coordinates(37.11, 97.25).country, "");
    }

    #[test]
    fn parse_coordinates_accepts_pairs() {
        assert_eq!(parse_coordinates("45.8150,15.9819"), Some((45.8150, 15.9819)));
        assert_eq!(parse_coordinates(" -33.8688 , 151.2093 "), Some((-33.8688, 151.2093)));
        assert_eq!(parse_coordinates("45,15"), Some((45.0, 15.0)));
        assert_eq!(parse_coordinates("90,180"), Some((90.0, 180.0)));
    }

    #[test]
    fn parse_coordinates_rejects_other_input() {
        assert!(parse_coordinates("London").is_none());
        assert!(parse_coordinates("").is_none());
        assert!(parse_coordinates("45").is_none());
        assert!(parse_coordinates("45,15,20").is_none());
        assert!(parse_coordinates("91,0").is_none());
        assert!(parse_coordinates("0,-181").is_none());
    }
}
