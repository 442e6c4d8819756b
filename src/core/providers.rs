//! Deep links into the rental listing sites.
//!
//! Every provider is a pure function of the normalized request. The builders
//! use the location text as the user typed it rather than the geocoded
//! display name, so each site runs its own search on the original wording.
//! Filters that are absent are left out of the URL entirely.

use crate::core::{GeoLocation, ProviderLink, SearchRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded::Serializer;

const IMMOSCOUT_URL: &str = "https://www.immobilienscout24.de/Suche/deutschland/wohnung-mieten";
const IMMOWELT_URL: &str = "https://www.immowelt.de/liste/deutschland/wohnungen/mieten";
const IMMONET_URL: &str = "https://www.immonet.de/classified-search";
const KLEINANZEIGEN_URL: &str = "https://www.kleinanzeigen.de/s-wohnung-mieten";
const KLEINANZEIGEN_CATEGORY: &str = "k0c203";
const WG_GESUCHT_URL: &str =
    "https://www.wg-gesucht.de/wg-zimmer-und-1-zimmer-wohnungen-in-Deutschland.0.0.1.0.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    ImmoScout24,
    Immowelt,
    Immonet,
    Kleinanzeigen,
    WgGesucht,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::ImmoScout24,
        Provider::Immowelt,
        Provider::Immonet,
        Provider::Kleinanzeigen,
        Provider::WgGesucht,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::ImmoScout24 => "ImmoScout24",
            Provider::Immowelt => "Immowelt",
            Provider::Immonet => "Immonet",
            Provider::Kleinanzeigen => "Kleinanzeigen Immobilien",
            Provider::WgGesucht => "WG-Gesucht",
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            Provider::ImmoScout24 => "www.immobilienscout24.de",
            Provider::Immowelt => "www.immowelt.de",
            Provider::Immonet => "www.immonet.de",
            Provider::Kleinanzeigen => "www.kleinanzeigen.de",
            Provider::WgGesucht => "www.wg-gesucht.de",
        }
    }

    /// Query parameter carrying the rent ceiling, if the site takes one.
    pub fn rent_param(&self) -> Option<&'static str> {
        match self {
            Provider::ImmoScout24 => Some("price"),
            Provider::Immowelt => Some("ma"),
            Provider::Immonet => Some("priceMax"),
            Provider::Kleinanzeigen => None,
            Provider::WgGesucht => Some("rent_types"),
        }
    }

    /// Query parameter carrying the minimum room count, if the site takes one.
    pub fn rooms_param(&self) -> Option<&'static str> {
        match self {
            Provider::ImmoScout24 => Some("numberofrooms"),
            Provider::Immowelt => Some("zi"),
            Provider::Immonet => Some("numberOfRoomsMin"),
            Provider::Kleinanzeigen | Provider::WgGesucht => None,
        }
    }

    pub fn build_url(&self, query: &SearchRequest, _geo: &GeoLocation) -> String {
        match self {
            Provider::ImmoScout24 => immoscout_url(query),
            Provider::Immowelt => immowelt_url(query),
            Provider::Immonet => immonet_url(query),
            Provider::Kleinanzeigen => kleinanzeigen_url(query),
            Provider::WgGesucht => wg_gesucht_url(query),
        }
    }

    pub fn link(&self, query: &SearchRequest, geo: &GeoLocation) -> ProviderLink {
        ProviderLink {
            provider_name: self.name().to_string(),
            url: self.build_url(query, geo),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn whole(value: f64) -> String {
    format!("{:.0}", value.round())
}

fn with_query(base: &str, pairs: &[(&str, String)]) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("{}?{}", base, serializer.finish())
}

fn immoscout_url(query: &SearchRequest) -> String {
    let mut pairs = vec![
        ("enteredFrom", "result_list".to_string()),
        ("geocoordinates", query.location_text.clone()),
    ];
    if let Some(rent) = query.rent_max {
        pairs.push(("price", format!("-{}", whole(rent))));
    }
    if let Some(rooms) = query.rooms_min {
        pairs.push(("numberofrooms", format!("{}-", rooms)));
    }
    with_query(IMMOSCOUT_URL, &pairs)
}

fn immowelt_url(query: &SearchRequest) -> String {
    let mut pairs = vec![("ort", query.location_text.clone())];
    if let Some(rent) = query.rent_max {
        pairs.push(("ma", whole(rent)));
    }
    if let Some(rooms) = query.rooms_min {
        pairs.push(("zi", rooms.to_string()));
    }
    with_query(IMMOWELT_URL, &pairs)
}

fn immonet_url(query: &SearchRequest) -> String {
    let mut pairs = vec![
        ("distributionTypes", "Rent".to_string()),
        ("estateTypes", "Apartment".to_string()),
        ("locations", query.location_text.clone()),
    ];
    if let Some(rent) = query.rent_max {
        pairs.push(("priceMax", whole(rent)));
    }
    if let Some(rooms) = query.rooms_min {
        pairs.push(("numberOfRoomsMin", rooms.to_string()));
    }
    with_query(IMMONET_URL, &pairs)
}

/// Free-text classifieds: the search phrase goes into the path, not the query.
/// The space after "miete" is kept even when no rent follows.
fn kleinanzeigen_url(query: &SearchRequest) -> String {
    let mut phrase = format!("{} wohnung miete ", query.location_text);
    if let Some(rent) = query.rent_max {
        phrase.push_str(&format!("{} euro", rent));
    }
    format!(
        "{}/{}/{}",
        KLEINANZEIGEN_URL,
        urlencoding::encode(&phrase),
        KLEINANZEIGEN_CATEGORY
    )
}

fn wg_gesucht_url(query: &SearchRequest) -> String {
    let mut pairs = vec![("city_name", query.location_text.clone())];
    if let Some(rent) = query.rent_max {
        pairs.push(("rent_types", format!("0-{}", whole(rent))));
    }
    with_query(WG_GESUCHT_URL, &pairs)
}

/// Fixed, ordered set of providers. Link order follows registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self {
            providers: Provider::ALL.to_vec(),
        }
    }
}

impl ProviderRegistry {
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn build_links(&self, query: &SearchRequest, geo: &GeoLocation) -> Vec<ProviderLink> {
        self.providers
            .iter()
            .map(|provider| provider.link(query, geo))
            .collect()
    }
}
