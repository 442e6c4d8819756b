pub mod orchestrator;
pub mod providers;
pub mod session;

pub use crate::domain::events::{SearchEvent, SearchState};
pub use crate::domain::model::{
    AreaType, GeoLocation, PointOfInterest, ProviderLink, SearchForm, SearchRequest, SearchResult,
    DEFAULT_RADIUS_KM, UNNAMED_PLACE,
};
pub use crate::domain::ports::{ConfigProvider, Geocoder, NearbyLookup, SearchObserver};
pub use crate::utils::error::Result;
