use crate::domain::model::{GeoLocation, ProviderLink, SearchRequest, SearchResult};
use serde::Serialize;

pub const DONE_MESSAGE: &str =
    "Done. Open provider links to see current listings with your filters.";

/// Where a single search run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchState {
    Idle,
    Invalid,
    Geocoding,
    GeocodeFailed,
    Geocoded,
    FetchingNearby,
    Completed,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Invalid | SearchState::GeocodeFailed | SearchState::Completed
        )
    }
}

/// Progress reported by the orchestrator, in transition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchEvent {
    /// A new search was submitted; anything shown for an earlier one is stale.
    Reset,
    Rejected {
        message: String,
    },
    Geocoding {
        location: String,
    },
    GeocodeFailed {
        message: String,
    },
    Geocoded {
        request: SearchRequest,
        geo: GeoLocation,
        provider_links: Vec<ProviderLink>,
    },
    FetchingNearby,
    Completed {
        result: SearchResult,
    },
}

impl SearchEvent {
    pub fn state(&self) -> SearchState {
        match self {
            SearchEvent::Reset => SearchState::Idle,
            SearchEvent::Rejected { .. } => SearchState::Invalid,
            SearchEvent::Geocoding { .. } => SearchState::Geocoding,
            SearchEvent::GeocodeFailed { .. } => SearchState::GeocodeFailed,
            SearchEvent::Geocoded { .. } => SearchState::Geocoded,
            SearchEvent::FetchingNearby => SearchState::FetchingNearby,
            SearchEvent::Completed { .. } => SearchState::Completed,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SearchEvent::Rejected { .. } | SearchEvent::GeocodeFailed { .. }
        )
    }

    /// Status line for this transition, if it has one.
    pub fn status_message(&self) -> Option<String> {
        match self {
            SearchEvent::Rejected { message } | SearchEvent::GeocodeFailed { message } => {
                Some(message.clone())
            }
            SearchEvent::Geocoding { location } => {
                Some(format!("Searching location for \"{}\"...", location))
            }
            SearchEvent::Geocoded { geo, .. } => Some(format!(
                "Found {}. Building map and provider search links...",
                geo.display_name
            )),
            SearchEvent::Reset | SearchEvent::FetchingNearby => None,
            SearchEvent::Completed { .. } => Some(DONE_MESSAGE.to_string()),
        }
    }
}
