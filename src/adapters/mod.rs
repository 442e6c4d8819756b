// Adapters layer: HTTP clients behind the domain ports.

pub mod nominatim;
pub mod overpass;

pub use nominatim::NominatimGeocoder;
pub use overpass::OverpassClient;

use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
