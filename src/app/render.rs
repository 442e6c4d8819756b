//! Plain-text rendering of search progress and results.
//!
//! All functions are pure; callers decide where the text goes.

use crate::core::{GeoLocation, PointOfInterest, ProviderLink, SearchEvent, SearchRequest, SearchResult};

pub const NEARBY_DISPLAY_LIMIT: usize = 8;
pub const NO_NEARBY_MESSAGE: &str = "No nearby results found from OpenStreetMap data.";

pub fn status_line(event: &SearchEvent) -> Option<String> {
    let message = event.status_message()?;
    if event.is_error() {
        Some(format!("❌ {}", message))
    } else {
        Some(message)
    }
}

pub fn render_map(geo: &GeoLocation, request: &SearchRequest) -> String {
    [
        "Google Maps check".to_string(),
        format!("Resolved location: {}", geo.display_name),
        format!("Open this area in Google Maps: {}", geo.maps_url()),
        format!(
            "Preference: {} within {} km.",
            request.area_type, request.radius_km
        ),
    ]
    .join("\n")
}

pub fn render_providers(links: &[ProviderLink]) -> String {
    let mut lines = vec!["Provider searches".to_string()];
    lines.extend(
        links
            .iter()
            .map(|link| format!("  {}: {}", link.provider_name, link.url)),
    );
    lines.join("\n")
}

pub fn render_nearby(items: &[PointOfInterest], label: &str, radius_km: f64) -> String {
    let mut lines = vec![format!("Nearby {} (within {} km)", label, radius_km)];
    if items.is_empty() {
        lines.push(NO_NEARBY_MESSAGE.to_string());
    } else {
        lines.extend(
            items
                .iter()
                .take(NEARBY_DISPLAY_LIMIT)
                .map(|item| format!("  - {} (map: {})", item.name, item.maps_url())),
        );
    }
    lines.join("\n")
}

pub fn render_result(result: &SearchResult) -> String {
    [
        render_map(&result.geo, &result.request),
        render_providers(&result.provider_links),
        render_nearby(&result.nearby, &result.nearby_label, result.request.radius_km),
    ]
    .join("\n\n")
}
