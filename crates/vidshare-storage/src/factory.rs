#[cfg(feature = "store-local")]
use crate::LocalStore;
#[cfg(feature = "store-rest")]
use crate::RestStore;
use crate::{MediaStore, MemoryStore, StoreBackend, StoreError, StoreResult};
use std::sync::Arc;
use vidshare_core::Config;

/// Create a media store based on configuration
pub async fn create_store(config: &Config) -> StoreResult<Arc<dyn MediaStore>> {
    let bucket = config.store_bucket().to_string();

    match config.store_backend() {
        StoreBackend::Memory => {
            let base_url = config
                .local_store_base_url()
                .unwrap_or("http://localhost:3000/storage");
            Ok(Arc::new(MemoryStore::new(base_url, bucket)))
        }

        #[cfg(feature = "store-rest")]
        StoreBackend::Rest => {
            let url = config
                .store_url()
                .map(String::from)
                .ok_or_else(|| StoreError::ConfigError("STORE_URL not configured".to_string()))?;
            let api_key = config.store_api_key().map(String::from).ok_or_else(|| {
                StoreError::ConfigError("STORE_API_KEY not configured".to_string())
            })?;

            let store = RestStore::new(url, api_key, bucket)?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-rest"))]
        StoreBackend::Rest => Err(StoreError::ConfigError(
            "Rest store backend not available (store-rest feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-local")]
        StoreBackend::Local => {
            let base_path = config
                .local_store_path()
                .map(String::from)
                .ok_or_else(|| {
                    StoreError::ConfigError("LOCAL_STORE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_store_base_url()
                .map(String::from)
                .unwrap_or_else(|| format!("file://{}", base_path.trim_end_matches('/')));

            let store = LocalStore::new(base_path, base_url, bucket).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-local"))]
        StoreBackend::Local => Err(StoreError::ConfigError(
            "Local store backend not available (store-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        Config::from_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_default_config_builds_memory_store() {
        let store = create_store(&config(&[])).await.unwrap();
        assert_eq!(store.backend_type(), StoreBackend::Memory);
    }

    #[tokio::test]
    async fn test_rest_without_credentials_is_config_error() {
        let result = create_store(&config(&[("STORE_BACKEND", "rest")])).await;
        assert!(matches!(result, Err(StoreError::ConfigError(_))));
    }

    #[cfg(feature = "store-rest")]
    #[tokio::test]
    async fn test_rest_store_from_config() {
        let store = create_store(&config(&[
            ("STORE_BACKEND", "rest"),
            ("STORE_URL", "https://project.example.co"),
            ("STORE_API_KEY", "anon"),
        ]))
        .await
        .unwrap();
        assert_eq!(store.backend_type(), StoreBackend::Rest);
    }

    #[cfg(feature = "store-local")]
    #[tokio::test]
    async fn test_local_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let store = create_store(&config(&[
            ("STORE_BACKEND", "local"),
            ("LOCAL_STORE_PATH", path.as_str()),
        ]))
        .await
        .unwrap();
        assert_eq!(store.backend_type(), StoreBackend::Local);
    }
}
