use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_NEARBY_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub geocoding: GeocodingConfig,
    pub nearby: NearbyConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            accept_language: "en".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub result_limit: usize,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NEARBY_ENDPOINT.to_string(),
            timeout_seconds: 10,
            result_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("rent-scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse config text, substituting `${VAR}` placeholders from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoutError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Uses the file when one is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("geocoding.endpoint", &self.geocoding.endpoint)?;
        validation::validate_non_empty_string(
            "geocoding.accept_language",
            &self.geocoding.accept_language,
        )?;
        validation::validate_positive_number(
            "geocoding.timeout_seconds",
            self.geocoding.timeout_seconds,
            1,
        )?;

        validation::validate_url("nearby.endpoint", &self.nearby.endpoint)?;
        validation::validate_positive_number(
            "nearby.timeout_seconds",
            self.nearby.timeout_seconds,
            1,
        )?;
        validation::validate_range("nearby.result_limit", self.nearby.result_limit, 1, 100)?;

        validation::validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn geocoding_endpoint(&self) -> &str {
        &self.geocoding.endpoint
    }

    fn accept_language(&self) -> &str {
        &self.geocoding.accept_language
    }

    fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoding.timeout_seconds)
    }

    fn nearby_endpoint(&self) -> &str {
        &self.nearby.endpoint
    }

    fn nearby_timeout(&self) -> Duration {
        Duration::from_secs(self.nearby.timeout_seconds)
    }

    fn nearby_result_limit(&self) -> usize {
        self.nearby.result_limit
    }

    fn user_agent(&self) -> &str {
        &self.http.user_agent
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
