use crate::core::geolocation::{Coordinates, FixedPosition, GeolocationProvider, Unavailable};
use crate::error::ConfigError;
use crate::net::IpLookup;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://duospace-backend.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub session_file: Option<PathBuf>,
    pub geolocation: GeolocationConfig,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            session_file: None,
            geolocation: GeolocationConfig::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(raw.as_str()).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An empty document yields the defaults.
    pub fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    None,
    Fixed,
    IpLookup,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeolocationConfig {
    pub provider: ProviderKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub url: Option<String>,
}

impl GeolocationConfig {
    pub fn build(&self, timeout: Duration) -> Result<Arc<dyn GeolocationProvider>, ConfigError> {
        match self.provider {
            ProviderKind::None => Ok(Arc::new(Unavailable)),
            ProviderKind::Fixed => match (self.latitude, self.longitude) {
                (Some(latitude), Some(longitude)) => Ok(Arc::new(FixedPosition(
                    Coordinates::new(latitude, longitude),
                ))),
                _ => Err(ConfigError::Geolocation("fixed", "latitude and longitude")),
            },
            ProviderKind::IpLookup => match self.url.as_deref() {
                Some(url) if !url.trim().is_empty() => Ok(Arc::new(IpLookup::new(url, timeout))),
                _ => Err(ConfigError::Geolocation("ip_lookup", "a url")),
            },
        }
    }
}
