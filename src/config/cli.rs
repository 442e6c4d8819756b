use crate::domain::model::SearchForm;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filters are taken as raw text, the way a search form hands them over.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rent-scout")]
#[command(about = "Find rental listing searches and nearby places for a German location")]
pub struct CliConfig {
    #[arg(long, short = 'l', help = "City, district or postal code in Germany")]
    pub location: String,

    #[arg(long, help = "Maximum monthly rent in euro")]
    pub rent_max: Option<String>,

    #[arg(long, help = "Minimum number of rooms")]
    pub rooms_min: Option<String>,

    #[arg(long, default_value = "station", help = "Nearby places: station, village or city")]
    pub area_type: String,

    #[arg(long, help = "Radius for nearby places in km (default 10)")]
    pub radius_km: Option<String>,

    #[arg(long, help = "TOML file with endpoint and HTTP settings")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the search result as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn search_form(&self) -> SearchForm {
        SearchForm {
            location: self.location.clone(),
            rent_max: self.rent_max.clone(),
            rooms_min: self.rooms_min.clone(),
            area_type: Some(self.area_type.clone()),
            radius_km: self.radius_km.clone(),
        }
    }
}
