//! Turns a free-text German location into a map confirmation, nearby places
//! and deep links into rental listing sites.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{NominatimGeocoder, OverpassClient};
pub use crate::core::orchestrator::SearchOrchestrator;
pub use crate::core::providers::{Provider, ProviderRegistry};
pub use crate::core::session::{SearchOutcome, SearchSession};
pub use crate::utils::error::{Result, ScoutError};
