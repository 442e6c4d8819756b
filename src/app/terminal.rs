use crate::app::render;
use crate::core::{SearchEvent, SearchObserver};

/// Prints status lines to stderr and, unless disabled, result panels to
/// stdout as soon as the matching state is reached. Everything printed comes
/// from the event itself, so one observer can serve any number of searches.
pub struct TerminalObserver {
    panels: bool,
}

impl TerminalObserver {
    pub fn new(panels: bool) -> Self {
        Self { panels }
    }

    /// Text this observer shows on stdout for `event`, if any.
    pub fn panel_text(&self, event: &SearchEvent) -> Option<String> {
        if !self.panels {
            return None;
        }

        match event {
            SearchEvent::Geocoded {
                request,
                geo,
                provider_links,
            } => Some(format!(
                "{}\n\n{}\n",
                render::render_map(geo, request),
                render::render_providers(provider_links)
            )),
            SearchEvent::Completed { result } => Some(render::render_nearby(
                &result.nearby,
                &result.nearby_label,
                result.request.radius_km,
            )),
            _ => None,
        }
    }
}

impl SearchObserver for TerminalObserver {
    fn on_event(&self, event: &SearchEvent) {
        if let Some(line) = render::status_line(event) {
            eprintln!("{}", line);
        }
        if let Some(text) = self.panel_text(event) {
            println!("{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::orchestrator::SearchOrchestrator;
    use crate::core::session::SearchSession;
    use crate::core::{AreaType, GeoLocation, Geocoder, NearbyLookup, PointOfInterest, SearchRequest};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedGeocoder;

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, location_text: &str) -> Result<GeoLocation> {
            Ok(GeoLocation::new(
                52.0,
                10.0,
                format!("{}, Germany", location_text),
            ))
        }
    }

    struct OnePlace;

    #[async_trait]
    impl NearbyLookup for OnePlace {
        async fn find_nearby(
            &self,
            geo: &GeoLocation,
            _: AreaType,
            _: f64,
        ) -> Vec<PointOfInterest> {
            vec![PointOfInterest {
                name: "Somewhere".to_string(),
                latitude: geo.latitude,
                longitude: geo.longitude,
            }]
        }
    }

    /// Collects the panel text a terminal observer would print.
    struct CapturingTerminal {
        terminal: TerminalObserver,
        printed: Mutex<Vec<String>>,
    }

    impl SearchObserver for CapturingTerminal {
        fn on_event(&self, event: &SearchEvent) {
            if let Some(text) = self.terminal.panel_text(event) {
                self.printed.lock().unwrap().push(text);
            }
        }
    }

    #[tokio::test]
    async fn test_each_search_shows_its_own_preferences() {
        let session = SearchSession::new(
            SearchOrchestrator::new(FixedGeocoder, OnePlace),
            CapturingTerminal {
                terminal: TerminalObserver::new(true),
                printed: Mutex::new(Vec::new()),
            },
        );

        session.submit(SearchRequest::new("Berlin")).await;
        session
            .submit(
                SearchRequest::new("Hamburg")
                    .with_area_type(AreaType::Village)
                    .with_radius_km(25.0),
            )
            .await;

        let printed = session.observer().printed.lock().unwrap();
        assert_eq!(printed.len(), 4);
        assert!(printed[0].contains("Preference: station within 10 km."));
        assert!(printed[1].starts_with("Nearby Stations (within 10 km)"));
        assert!(printed[2].contains("Resolved location: Hamburg, Germany"));
        assert!(printed[2].contains("Preference: village within 25 km."));
        assert!(printed[3].starts_with("Nearby Villages (within 25 km)"));
    }

    #[test]
    fn test_panels_can_be_disabled() {
        let terminal = TerminalObserver::new(false);
        let event = SearchEvent::Geocoded {
            request: SearchRequest::new("Berlin"),
            geo: GeoLocation::new(52.52, 13.405, "Berlin, Germany"),
            provider_links: vec![],
        };
        assert!(terminal.panel_text(&event).is_none());
    }
}
