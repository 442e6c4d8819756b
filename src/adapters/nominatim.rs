//! Geocoding against a Nominatim-compatible `/search` endpoint.
//!
//! Every query is suffixed with the country so the service ranks German
//! places first, and only the top match is requested.

use crate::core::{ConfigProvider, GeoLocation, Geocoder};
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use serde::Deserialize;

pub const COUNTRY_QUALIFIER: &str = "Germany";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    accept_language: String,
}

impl NominatimGeocoder {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = super::build_client(config.user_agent(), config.geocoding_timeout())?;
        Ok(Self::with_client(
            client,
            config.geocoding_endpoint(),
            config.accept_language(),
        ))
    }

    pub fn with_client(client: Client, endpoint: &str, accept_language: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            accept_language: accept_language.to_string(),
        }
    }

    pub fn qualified_query(location_text: &str) -> String {
        format!("{}, {}", location_text, COUNTRY_QUALIFIER)
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ScoutError::geocoding_unavailable(format!("invalid {} in response: {}", field, raw))
        })
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, location_text: &str) -> Result<GeoLocation> {
        let query = Self::qualified_query(location_text);
        tracing::debug!("Geocoding '{}' via {}", query, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.as_str()), ("format", "jsonv2"), ("limit", "1")])
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(|e| ScoutError::geocoding_unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Geocoding response status: {}", status);
        if !status.is_success() {
            return Err(ScoutError::geocoding_unavailable(format!(
                "upstream returned {}",
                status
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            ScoutError::geocoding_unavailable(format!("undecodable response: {}", e))
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::location_not_found(location_text))?;

        Ok(GeoLocation {
            latitude: parse_coordinate("lat", &place.lat)?,
            longitude: parse_coordinate("lon", &place.lon)?,
            display_name: place.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn geocoder(server: &MockServer) -> NominatimGeocoder {
        NominatimGeocoder::with_client(Client::new(), &server.url("/search"), "en")
    }

    #[test]
    fn test_qualified_query() {
        assert_eq!(
            NominatimGeocoder::qualified_query("Freiburg"),
            "Freiburg, Germany"
        );
    }

    #[tokio::test]
    async fn test_resolve_takes_first_match() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Freiburg, Germany")
                .query_param("format", "jsonv2")
                .query_param("limit", "1")
                .header("accept-language", "en");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"lat": "47.999", "lon": "7.842", "display_name": "Freiburg im Breisgau, Germany"}
                ]));
        });

        let geo = geocoder(&server).resolve("Freiburg").await.unwrap();

        api_mock.assert();
        assert_eq!(geo.latitude, 47.999);
        assert_eq!(geo.longitude, 7.842);
        assert_eq!(geo.display_name, "Freiburg im Breisgau, Germany");
    }

    #[tokio::test]
    async fn test_resolve_empty_result_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([]));
        });

        let err = geocoder(&server).resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, ScoutError::LocationNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_server_error_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(503);
        });

        let err = geocoder(&server).resolve("Berlin").await.unwrap_err();
        assert!(matches!(err, ScoutError::GeocodingUnavailable { .. }));
        assert_eq!(err.to_string(), "Geocoding service unavailable at the moment.");
    }

    #[tokio::test]
    async fn test_resolve_bad_coordinates_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(serde_json::json!([
                {"lat": "north", "lon": "7.8", "display_name": "Nowhere"}
            ]));
        });

        let err = geocoder(&server).resolve("Nowhere").await.unwrap_err();
        assert!(matches!(err, ScoutError::GeocodingUnavailable { .. }));
    }
}
