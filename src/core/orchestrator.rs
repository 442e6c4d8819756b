use crate::core::providers::ProviderRegistry;
use crate::core::{
    Geocoder, NearbyLookup, SearchEvent, SearchObserver, SearchRequest, SearchResult,
};
use crate::utils::error::Result;

/// Observer that drops every event.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&self, _event: &SearchEvent) {}
}

/// Runs one search: validate, geocode, then provider links and nearby places.
pub struct SearchOrchestrator<G: Geocoder, N: NearbyLookup> {
    geocoder: G,
    nearby: N,
    registry: ProviderRegistry,
}

impl<G: Geocoder, N: NearbyLookup> SearchOrchestrator<G, N> {
    pub fn new(geocoder: G, nearby: N) -> Self {
        Self::with_registry(geocoder, nearby, ProviderRegistry::default())
    }

    pub fn with_registry(geocoder: G, nearby: N, registry: ProviderRegistry) -> Self {
        Self {
            geocoder,
            nearby,
            registry,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Errors are reported to the observer before being returned. A failed
    /// nearby lookup is not an error: the result just has no nearby places.
    pub async fn run(
        &self,
        request: SearchRequest,
        observer: &dyn SearchObserver,
    ) -> Result<SearchResult> {
        let request = match request.normalized() {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Search rejected: {}", e);
                observer.on_event(&SearchEvent::Rejected {
                    message: e.user_friendly_message(),
                });
                return Err(e);
            }
        };

        observer.on_event(&SearchEvent::Geocoding {
            location: request.location_text.clone(),
        });

        let geo = match self.geocoder.resolve(&request.location_text).await {
            Ok(geo) => geo,
            Err(e) => {
                tracing::info!("Geocoding '{}' failed: {:?}", request.location_text, e);
                observer.on_event(&SearchEvent::GeocodeFailed {
                    message: e.user_friendly_message(),
                });
                return Err(e);
            }
        };
        tracing::info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            request.location_text,
            geo.display_name,
            geo.latitude,
            geo.longitude
        );

        let provider_links = self.registry.build_links(&request, &geo);
        observer.on_event(&SearchEvent::Geocoded {
            request: request.clone(),
            geo: geo.clone(),
            provider_links: provider_links.clone(),
        });

        observer.on_event(&SearchEvent::FetchingNearby);
        let nearby = self
            .nearby
            .find_nearby(&geo, request.area_type, request.radius_km)
            .await;
        tracing::info!("Nearby lookup returned {} places", nearby.len());

        let nearby_label = request.area_type.nearby_label().to_string();
        let result = SearchResult {
            request,
            geo,
            provider_links,
            nearby,
            nearby_label,
        };
        observer.on_event(&SearchEvent::Completed {
            result: result.clone(),
        });

        Ok(result)
    }
}
