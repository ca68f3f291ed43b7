//! Configuration module
//!
//! Store connection settings and upload timings. The store's endpoint and
//! credentials are only ever read here and handed to the store factory; the
//! feed and upload components receive an already-built store.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{DEFAULT_BUCKET, DEFAULT_PROGRESS_TICK_MS, DEFAULT_SUCCESS_HOLD_MS};
use crate::store_types::StoreBackend;

/// Where videos and comments live.
#[derive(Clone, Debug)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// Base URL of the hosted backend (rest backend).
    pub url: Option<String>,
    /// Anonymous API key of the hosted backend (rest backend).
    pub api_key: Option<String>,
    pub bucket: String,
    pub local_path: Option<String>,
    pub local_base_url: Option<String>,
}

/// Timings of the cosmetic upload progress, read from `UPLOAD_*` variables.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_success_hold_ms")]
    pub success_hold_ms: u64,
}

fn default_tick_ms() -> u64 {
    DEFAULT_PROGRESS_TICK_MS
}

fn default_success_hold_ms() -> u64 {
    DEFAULT_SUCCESS_HOLD_MS
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            tick_ms: DEFAULT_PROGRESS_TICK_MS,
            success_hold_ms: DEFAULT_SUCCESS_HOLD_MS,
        }
    }
}

impl UploadSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn success_hold(&self) -> Duration {
        Duration::from_millis(self.success_hold_ms)
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub store: StoreSettings,
    pub upload: UploadSettings,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::vars())
    }

    /// Build the configuration from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, anyhow::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let get = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let backend = match get("STORE_BACKEND") {
            Some(value) => value.parse::<StoreBackend>()?,
            None => StoreBackend::Memory,
        };

        let store = StoreSettings {
            backend,
            url: get("STORE_URL"),
            api_key: get("STORE_API_KEY"),
            bucket: get("STORE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            local_path: get("LOCAL_STORE_PATH"),
            local_base_url: get("LOCAL_STORE_BASE_URL"),
        };

        let upload = envy::prefixed("UPLOAD_")
            .from_iter::<_, UploadSettings>(vars.clone())
            .map_err(|e| anyhow::anyhow!("Invalid UPLOAD_* settings: {}", e))?;

        Ok(Config {
            environment,
            store,
            upload,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload.tick_ms == 0 {
            return Err(anyhow::anyhow!("UPLOAD_TICK_MS must be greater than zero"));
        }

        if self.store.bucket.contains('/') {
            return Err(anyhow::anyhow!("STORE_BUCKET must not contain '/'"));
        }

        match self.store.backend {
            StoreBackend::Rest => {
                match self.store.url.as_deref() {
                    Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                    Some(_) => {
                        return Err(anyhow::anyhow!(
                            "STORE_URL must be an http(s) URL when using the rest store backend"
                        ))
                    }
                    None => {
                        return Err(anyhow::anyhow!(
                            "STORE_URL must be set when using the rest store backend"
                        ))
                    }
                }
                if self.store.api_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "STORE_API_KEY must be set when using the rest store backend"
                    ));
                }
            }
            StoreBackend::Local => {
                if self.store.local_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORE_PATH must be set when using the local store backend"
                    ));
                }
            }
            StoreBackend::Memory => {
                if self.is_production() {
                    return Err(anyhow::anyhow!(
                        "The memory store backend cannot be used in production"
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store.backend
    }

    pub fn store_url(&self) -> Option<&str> {
        self.store.url.as_deref()
    }

    pub fn store_api_key(&self) -> Option<&str> {
        self.store.api_key.as_deref()
    }

    pub fn store_bucket(&self) -> &str {
        &self.store.bucket
    }

    pub fn local_store_path(&self) -> Option<&str> {
        self.store.local_path.as_deref()
    }

    pub fn local_store_base_url(&self) -> Option<&str> {
        self.store.local_base_url.as_deref()
    }

    pub fn upload_settings(&self) -> &UploadSettings {
        &self.upload
    }
}
