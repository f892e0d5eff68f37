use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config/default";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub poller: PollerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub products_path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ApiConfig {
    pub fn products_url(&self) -> String {
        // Tolerate a trailing slash on the base and a leading one on the path
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.products_path.trim_start_matches('/')
        )
    }
}

/// Which record shape the endpoint returns and how each record is displayed.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Generic,
    Typed,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    pub interval_secs: u64,
    pub variant: Variant,
    pub skip_overlapping: bool,
    pub target_id: String,
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// Defaults, then the (optional) file at `path`, then `APP_*` environment overrides.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Built-in defaults
            .set_default("api.base_url", "http://localhost:8080")?
            .set_default("api.products_path", "/api/v1/products")?
            .set_default("poller.interval_secs", 10)?
            .set_default("poller.variant", "generic")?
            .set_default("poller.skip_overlapping", false)?
            .set_default("poller.target_id", "product-list")?
            // Optional file, e.g. config/default.yaml
            .add_source(File::with_name(path).required(false))
            // APP_POLLER__INTERVAL_SECS=5 style overrides
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;

        // Interval must be positive
        if settings.poller.interval_secs == 0 {
            return Err(ConfigError::Message(
                "poller.interval_secs must be greater than zero".to_string(),
            ));
        }

        debug!(
            url = %settings.api.products_url(),
            headers = ?settings.api.headers,
            variant = ?settings.poller.variant,
            interval_secs = settings.poller.interval_secs,
            "Loaded settings"
        );

        Ok(settings)
    }
}
