use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const UNNAMED_PLACE: &str = "Unnamed";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Category of nearby places the user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    #[default]
    Station,
    Village,
    City,
}

impl AreaType {
    /// Unknown values fall back to `Station`, the same filter the nearby
    /// lookup uses when nothing else matches.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown area type '{}', falling back to station", value);
            AreaType::Station
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::Station => "station",
            AreaType::Village => "village",
            AreaType::City => "city",
        }
    }

    pub fn nearby_label(&self) -> &'static str {
        match self {
            AreaType::Station => "Stations",
            AreaType::Village => "Villages",
            AreaType::City => "Cities / towns",
        }
    }
}

impl FromStr for AreaType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "station" => Ok(AreaType::Station),
            "village" => Ok(AreaType::Village),
            "city" => Ok(AreaType::City),
            other => Err(format!("unknown area type: {}", other)),
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub location_text: String,
    pub rent_max: Option<f64>,
    pub rooms_min: Option<f64>,
    pub area_type: AreaType,
    pub radius_km: f64,
}

impl SearchRequest {
    pub fn new<S: Into<String>>(location_text: S) -> Self {
        Self {
            location_text: location_text.into(),
            rent_max: None,
            rooms_min: None,
            area_type: AreaType::default(),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    pub fn with_rent_max(mut self, rent_max: f64) -> Self {
        self.rent_max = Some(rent_max);
        self
    }

    pub fn with_rooms_min(mut self, rooms_min: f64) -> Self {
        self.rooms_min = Some(rooms_min);
        self
    }

    pub fn with_area_type(mut self, area_type: AreaType) -> Self {
        self.area_type = area_type;
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Trims the location and enforces the request invariants. Filters that
    /// are not positive numbers are dropped and a non-positive radius becomes
    /// the default. Fails only when no location text remains.
    pub fn normalized(self) -> Result<Self> {
        let location_text = self.location_text.trim().to_string();
        if location_text.is_empty() {
            return Err(ScoutError::validation());
        }

        Ok(Self {
            location_text,
            rent_max: self.rent_max.filter(|v| is_positive(*v)),
            rooms_min: self.rooms_min.filter(|v| is_positive(*v)),
            area_type: self.area_type,
            radius_km: if is_positive(self.radius_km) {
                self.radius_km
            } else {
                DEFAULT_RADIUS_KM
            },
        })
    }
}

/// Raw values as typed into the search form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    pub location: String,
    pub rent_max: Option<String>,
    pub rooms_min: Option<String>,
    pub area_type: Option<String>,
    pub radius_km: Option<String>,
}

impl SearchForm {
    /// Never fails: blanks and garbage become "absent" (or the default
    /// radius). An empty location is left for the orchestrator to reject.
    pub fn normalize(&self) -> SearchRequest {
        SearchRequest {
            location_text: self.location.trim().to_string(),
            rent_max: parse_positive(self.rent_max.as_deref()),
            rooms_min: parse_positive(self.rooms_min.as_deref()),
            area_type: self
                .area_type
                .as_deref()
                .map(AreaType::parse_lenient)
                .unwrap_or_default(),
            radius_km: parse_positive(self.radius_km.as_deref()).unwrap_or(DEFAULT_RADIUS_KM),
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_positive(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| is_positive(*v))
}

fn maps_url(latitude: f64, longitude: f64) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("query", &format!("{},{}", latitude, longitude))
        .finish();
    format!("{}?{}", MAPS_SEARCH_URL, query)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl GeoLocation {
    pub fn new<S: Into<String>>(latitude: f64, longitude: f64, display_name: S) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    /// Link that opens the resolved coordinate in Google Maps.
    pub fn maps_url(&self) -> String {
        maps_url(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PointOfInterest {
    pub fn maps_url(&self) -> String {
        maps_url(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLink {
    pub provider_name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The normalized request this result answers.
    pub request: SearchRequest,
    pub geo: GeoLocation,
    pub provider_links: Vec<ProviderLink>,
    pub nearby: Vec<PointOfInterest>,
    pub nearby_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_type_parsing() {
        assert_eq!("city".parse::<AreaType>().unwrap(), AreaType::City);
        assert_eq!(" Village ".parse::<AreaType>().unwrap(), AreaType::Village);
        assert!("harbour".parse::<AreaType>().is_err());
        assert_eq!(AreaType::parse_lenient("harbour"), AreaType::Station);
        assert_eq!(AreaType::City.nearby_label(), "Cities / towns");
    }

    #[test]
    fn test_normalized_rejects_blank_location() {
        let err = SearchRequest::new("   \t").normalized().unwrap_err();
        assert!(matches!(err, ScoutError::ValidationError { .. }));
    }

    #[test]
    fn test_normalized_sanitizes_filters_and_radius() {
        let request = SearchRequest::new("  Köln ")
            .with_rent_max(-5.0)
            .with_rooms_min(0.0)
            .with_radius_km(f64::NAN)
            .normalized()
            .unwrap();

        assert_eq!(request.location_text, "Köln");
        assert_eq!(request.rent_max, None);
        assert_eq!(request.rooms_min, None);
        assert_eq!(request.radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_form_normalize() {
        let form = SearchForm {
            location: " Leipzig ".to_string(),
            rent_max: Some("750".to_string()),
            rooms_min: Some("".to_string()),
            area_type: Some("village".to_string()),
            radius_km: Some("abc".to_string()),
        };

        let request = form.normalize();
        assert_eq!(request.location_text, "Leipzig");
        assert_eq!(request.rent_max, Some(750.0));
        assert_eq!(request.rooms_min, None);
        assert_eq!(request.area_type, AreaType::Village);
        assert_eq!(request.radius_km, 10.0);
    }

    #[test]
    fn test_form_zero_radius_uses_default() {
        let form = SearchForm {
            location: "Bonn".to_string(),
            radius_km: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(form.normalize().radius_km, DEFAULT_RADIUS_KM);
        assert_eq!(form.normalize().area_type, AreaType::Station);
    }

    #[test]
    fn test_maps_url() {
        let geo = GeoLocation::new(47.999, 7.842, "Freiburg im Breisgau, Germany");
        assert_eq!(
            geo.maps_url(),
            "https://www.google.com/maps/search/?api=1&query=47.999%2C7.842"
        );
    }
}
