//! Nearby places from an Overpass API interpreter endpoint.

use crate::core::{AreaType, ConfigProvider, GeoLocation, NearbyLookup, PointOfInterest, UNNAMED_PLACE};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

pub const MIN_RADIUS_METERS: u64 = 1000;
pub const DEFAULT_RESULT_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl OverpassElement {
    fn into_point(self) -> Option<PointOfInterest> {
        let (latitude, longitude) = (self.lat?, self.lon?);
        let name = self
            .tags
            .get("name")
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| UNNAMED_PLACE.to_string());
        Some(PointOfInterest {
            name,
            latitude,
            longitude,
        })
    }
}

/// Kilometers to whole meters, never below [`MIN_RADIUS_METERS`].
pub fn radius_meters(radius_km: f64) -> u64 {
    let meters = (radius_km * 1000.0).round();
    if meters.is_finite() && meters > MIN_RADIUS_METERS as f64 {
        meters as u64
    } else {
        MIN_RADIUS_METERS
    }
}

pub fn selector(area_type: AreaType) -> &'static str {
    match area_type {
        AreaType::Station => r#"node["railway"="station"]"#,
        AreaType::Village => r#"node["place"="village"]"#,
        AreaType::City => r#"node["place"~"city|town"]"#,
    }
}

pub fn build_query(geo: &GeoLocation, area_type: AreaType, radius_km: f64, limit: usize) -> String {
    format!(
        "[out:json][timeout:25];\n(\n  {}(around:{},{},{});\n);\nout body {};",
        selector(area_type),
        radius_meters(radius_km),
        geo.latitude,
        geo.longitude,
        limit
    )
}

/// Why a nearby lookup came back empty. Never leaves this module.
#[derive(Error, Debug)]
enum NearbyDegraded {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),

    #[error("undecodable response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub struct OverpassClient {
    client: Client,
    endpoint: String,
    result_limit: usize,
}

impl OverpassClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = super::build_client(config.user_agent(), config.nearby_timeout())?;
        Ok(Self::with_client(
            client,
            config.nearby_endpoint(),
            config.nearby_result_limit(),
        ))
    }

    pub fn with_client(client: Client, endpoint: &str, result_limit: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            result_limit,
        }
    }

    async fn fetch(
        &self,
        query: String,
    ) -> std::result::Result<Vec<PointOfInterest>, NearbyDegraded> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await
            .map_err(NearbyDegraded::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NearbyDegraded::Status(status));
        }

        let body: OverpassResponse = response
            .json()
            .await
            .map_err(NearbyDegraded::Decode)?;

        Ok(body
            .elements
            .into_iter()
            .filter_map(OverpassElement::into_point)
            .collect())
    }
}

#[async_trait]
impl NearbyLookup for OverpassClient {
    async fn find_nearby(
        &self,
        geo: &GeoLocation,
        area_type: AreaType,
        radius_km: f64,
    ) -> Vec<PointOfInterest> {
        let query = build_query(geo, area_type, radius_km, self.result_limit);
        tracing::debug!("Overpass query:\n{}", query);

        match self.fetch(query).await {
            Ok(points) => {
                tracing::debug!("Found {} nearby {} entries", points.len(), area_type);
                points
            }
            Err(reason) => {
                tracing::warn!("Nearby lookup degraded to empty result: {}", reason);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn freiburg() -> GeoLocation {
        GeoLocation::new(47.999, 7.842, "Freiburg im Breisgau, Germany")
    }

    #[test]
    fn test_radius_is_floored() {
        assert_eq!(radius_meters(0.0), 1000);
        assert_eq!(radius_meters(0.4), 1000);
        assert_eq!(radius_meters(-3.0), 1000);
        assert_eq!(radius_meters(f64::NAN), 1000);
        assert_eq!(radius_meters(5.0), 5000);
        assert_eq!(radius_meters(2.5004), 2500);
    }

    #[test]
    fn test_build_query_for_city() {
        let query = build_query(&freiburg(), AreaType::City, 5.0, DEFAULT_RESULT_LIMIT);
        assert_eq!(
            query,
            "[out:json][timeout:25];\n(\n  node[\"place\"~\"city|town\"](around:5000,47.999,7.842);\n);\nout body 10;"
        );
    }

    #[test]
    fn test_selectors_are_exclusive() {
        assert!(selector(AreaType::Station).contains("railway"));
        assert!(selector(AreaType::Village).contains(r#""place"="village""#));
        assert!(!selector(AreaType::City).contains("village"));
    }

    #[tokio::test]
    async fn test_find_nearby_maps_elements() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/interpreter")
                .header("content-type", "text/plain")
                .body_contains(r#"node["railway"="station"](around:1000,47.999,7.842)"#);
            then.status(200).json_body(serde_json::json!({
                "elements": [
                    {"type": "node", "id": 1, "lat": 47.997, "lon": 7.841, "tags": {"name": "Freiburg Hbf"}},
                    {"type": "node", "id": 2, "lat": 47.98, "lon": 7.85},
                    {"type": "way", "id": 3}
                ]
            }));
        });

        let client =
            OverpassClient::with_client(Client::new(), &server.url("/api/interpreter"), 10);
        let points = client.find_nearby(&freiburg(), AreaType::Station, 0.2).await;

        api_mock.assert();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].name, "Freiburg Hbf");
        assert_eq!(points[1].name, UNNAMED_PLACE);
    }

    #[tokio::test]
    async fn test_find_nearby_failure_is_empty() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/interpreter");
            then.status(429);
        });

        let client =
            OverpassClient::with_client(Client::new(), &server.url("/api/interpreter"), 10);
        let points = client.find_nearby(&freiburg(), AreaType::Village, 3.0).await;

        api_mock.assert();
        assert!(points.is_empty());

        let reason = client
            .fetch(build_query(&freiburg(), AreaType::Village, 3.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(reason, NearbyDegraded::Status(s) if s.as_u16() == 429));
    }

    #[tokio::test]
    async fn test_find_nearby_unreachable_is_empty() {
        // Nothing listens on port 1, so the connection is refused.
        let client =
            OverpassClient::with_client(Client::new(), "http://127.0.0.1:1/api/interpreter", 10);

        let points = client.find_nearby(&freiburg(), AreaType::Station, 5.0).await;
        assert!(points.is_empty());

        let reason = client
            .fetch(build_query(&freiburg(), AreaType::Station, 5.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(reason, NearbyDegraded::Transport(_)));
        assert!(reason.to_string().starts_with("request failed"));
    }

    #[tokio::test]
    async fn test_find_nearby_missing_elements_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/interpreter");
            then.status(200).json_body(serde_json::json!({"version": 0.6}));
        });

        let client =
            OverpassClient::with_client(Client::new(), &server.url("/api/interpreter"), 10);
        assert!(client
            .find_nearby(&freiburg(), AreaType::City, 3.0)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_nearby_undecodable_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/interpreter");
            then.status(200).body("<html>rate limited</html>");
        });

        let client =
            OverpassClient::with_client(Client::new(), &server.url("/api/interpreter"), 10);
        let reason = client
            .fetch(build_query(&freiburg(), AreaType::City, 3.0, 10))
            .await
            .unwrap_err();
        assert!(matches!(reason, NearbyDegraded::Decode(_)));
        assert!(client
            .find_nearby(&freiburg(), AreaType::City, 3.0)
            .await
            .is_empty());
    }
}
