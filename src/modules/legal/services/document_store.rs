use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::core::{AppError, Result};

/// Object storage for generated documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `body` under `path`, replacing any existing object.
    /// Returns the stored object path.
    async fn upload(&self, path: &str, content_type: &str, body: Vec<u8>) -> Result<String>;

    async fn download(&self, path: &str) -> Result<Vec<u8>>;
}

/// Shared, optionally-configured document store
#[derive(Clone, Default)]
pub struct DocumentStorage {
    store: Option<Arc<dyn DocumentStore>>,
}

impl DocumentStorage {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn from_config(config: Option<&StorageConfig>) -> Self {
        match config {
            Some(config) => Self::new(Arc::new(HttpDocumentStore::new(config))),
            None => Self::disabled(),
        }
    }

    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.store.as_ref()
    }
}

/// Storage REST client (`/object/{bucket}/{path}`) with retries on transient failures
pub struct HttpDocumentStore {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl HttpDocumentStore {
    pub fn new(config: &StorageConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn upload(&self, path: &str, content_type: &str, body: Vec<u8>) -> Result<String> {
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Upload of {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::storage(format!(
                "Upload of {} rejected with {}: {}",
                path, status, error_body
            )));
        }

        Ok(path.to_string())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.object_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Download of {} failed: {}", path, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Stored document {} not found", path)));
        }
        if !response.status().is_success() {
            return Err(AppError::storage(format!(
                "Download of {} failed with {}",
                path,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::storage(format!("Failed to read {}: {}", path, e)))?;

        Ok(bytes.to_vec())
    }
}
