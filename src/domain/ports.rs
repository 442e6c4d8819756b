use crate::domain::events::SearchEvent;
use crate::domain::model::{AreaType, GeoLocation, PointOfInterest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve free text to the single best match.
    async fn resolve(&self, location_text: &str) -> Result<GeoLocation>;
}

#[async_trait]
pub trait NearbyLookup: Send + Sync {
    /// Best effort: failures yield an empty list, never an error.
    async fn find_nearby(
        &self,
        geo: &GeoLocation,
        area_type: AreaType,
        radius_km: f64,
    ) -> Vec<PointOfInterest>;
}

pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent);
}

pub trait ConfigProvider: Send + Sync {
    fn geocoding_endpoint(&self) -> &str;
    fn accept_language(&self) -> &str;
    fn geocoding_timeout(&self) -> Duration;
    fn nearby_endpoint(&self) -> &str;
    fn nearby_timeout(&self) -> Duration;
    fn nearby_result_limit(&self) -> usize;
    fn user_agent(&self) -> &str;
}
