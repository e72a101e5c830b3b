//! Location resolution
//!
//! Turns a city name or a coordinate pair into the [`AddressContext`] the
//! dashboard consumes. Names are resolved through the Open-Meteo geocoding
//! API; coordinates are taken as-is and named after themselves.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::DashboardError;
use crate::config::WeatherConfig;
use crate::models::{AddressContext, LatLong};

/// Location as given by the user
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    Coordinates(f64, f64),
    Name(String),
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

/// One geocoding match
#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub timezone: Option<String>,
}

impl GeocodingResult {
    /// Display name with region or country for disambiguation
    #[must_use]
    pub fn display_name(&self) -> String {
        let region = [self.admin1.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .find(|region| !region.is_empty() && **region != self.name);
        match region {
            Some(region) => format!("{}, {}", self.name, region),
            None => self.name.clone(),
        }
    }
}

impl From<GeocodingResult> for AddressContext {
    fn from(result: GeocodingResult) -> Self {
        let latlong = LatLong::new(result.latitude, result.longitude);
        let ctx = AddressContext::new(result.display_name(), latlong);
        match result.admin1 {
            Some(region) => {
                let slug = region.to_lowercase().replace(' ', "-");
                ctx.with_urban_area(slug, region)
            }
            None => ctx,
        }
    }
}

/// Client for the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.geocoding_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for places matching a name, best match first
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}/search?name={}&count=5&language=en&format=json",
            self.base_url,
            urlencoding::encode(name)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::api(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::api(format!("Geocoding request returned {status}")).into());
        }

        let geocoding: GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Open-Meteo geocoding response")?;

        Ok(geocoding.results.unwrap_or_default())
    }

    /// Resolve a location input into an address context
    pub async fn resolve(&self, input: LocationInput) -> Result<AddressContext> {
        debug!("Resolving location input: {:?}", input);

        match input {
            LocationInput::Coordinates(lat, lon) => {
                let latlong = LatLong::new(lat, lon);
                if !latlong.is_valid() {
                    return Err(DashboardError::validation(format!(
                        "Coordinates out of range: {lat}, {lon}"
                    ))
                    .into());
                }
                Ok(AddressContext::new(latlong.format_coordinates(), latlong))
            }
            LocationInput::Name(name) => {
                if name.trim().is_empty() {
                    return Err(DashboardError::validation("Location cannot be empty").into());
                }
                let best = self
                    .search(&name)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| DashboardError::validation(format!("Location not found: {name}")))?;
                debug!(
                    "Found location: {} ({:.4}, {:.4})",
                    best.name, best.latitude, best.longitude
                );
                Ok(best.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeocodingClient {
        let config = WeatherConfig {
            geocoding_url: server.uri(),
            ..WeatherConfig::default()
        };
        GeocodingClient::new(&config).unwrap()
    }

    #[test]
    fn test_display_name() {
        let result = GeocodingResult {
            name: "Portland".to_string(),
            latitude: 45.52,
            longitude: -122.68,
            country: Some("United States".to_string()),
            admin1: Some("Oregon".to_string()),
            timezone: None,
        };
        assert_eq!(result.display_name(), "Portland, Oregon");

        let ctx: AddressContext = result.into();
        assert_eq!(ctx.valid_city_name(), Some("Portland, Oregon"));
        assert_eq!(
            ctx.address.unwrap().urban_area_slug.as_deref(),
            Some("oregon")
        );
    }

    #[tokio::test]
    async fn test_resolve_coordinates() {
        let server = MockServer::start().await;
        let ctx = client_for(&server)
            .resolve(LocationInput::Coordinates(46.8182, 8.2275))
            .await
            .unwrap();
        assert_eq!(ctx.city_name(), Some("46.8182, 8.2275"));
        assert_eq!(ctx.latlong, Some(LatLong::new(46.8182, 8.2275)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_out_of_range_coordinates() {
        let server = MockServer::start().await;
        let result = client_for(&server)
            .resolve(LocationInput::Coordinates(95.0, 0.0))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_resolve_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "Lisbon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "name": "Lisbon",
                    "latitude": 38.72,
                    "longitude": -9.13,
                    "country": "Portugal",
                    "admin1": "Lisbon",
                    "timezone": "Europe/Lisbon"
                }]
            })))
            .mount(&server)
            .await;

        let ctx = client_for(&server)
            .resolve(LocationInput::Name("Lisbon".to_string()))
            .await
            .unwrap();
        assert_eq!(ctx.city_name(), Some("Lisbon, Portugal"));
        assert_eq!(ctx.latlong, Some(LatLong::new(38.72, -9.13)));
    }

    #[tokio::test]
    async fn test_resolve_unknown_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .resolve(LocationInput::Name("Nowhere".to_string()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Location not found"));
    }

    #[tokio::test]
    async fn test_resolve_empty_name() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .resolve(LocationInput::Name("  ".to_string()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Location cannot be empty"));
    }
}
