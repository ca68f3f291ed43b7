//! Hosted backend reached over HTTP.
//!
//! Objects go to `/storage/v1/object/{bucket}/{key}` and table rows to the
//! PostgREST-style `/rest/v1/{table}` endpoints. Every request carries the
//! anonymous API key both as `apikey` and as a bearer token.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use vidshare_core::constants::OBJECT_CACHE_CONTROL_SECS;
use vidshare_core::{CommentRecord, NewComment, NewVideo, StoreBackend, VideoFile, VideoRecord};

use crate::keys;
use crate::tables::Tables;
use crate::traits::{MediaStore, StoreError, StoreResult};

const VIDEOS_TABLE: &str = "videos";
const COMMENTS_TABLE: &str = "comments";
const INCREMENT_VIEWS_RPC: &str = "increment_views";

/// HTTP media store with API key auth.
#[derive(Clone, Debug)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStore {
    pub fn new(base_url: String, api_key: String, bucket: String) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn table_url(&self, table: &str) -> String {
        self.build_url(&format!("/rest/v1/{}", table))
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
    }

    /// Public locator of a stored object.
    pub fn public_url(&self, key: &str) -> String {
        keys::object_url(
            &self.build_url("/storage/v1/object/public"),
            &self.bucket,
            key,
        )
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(rejection(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> StoreResult<T> {
        let response = self.send(request).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn put_object(&self, key: &str, file: &VideoFile) -> StoreResult<()> {
        let url = self.build_url(&format!(
            "/storage/v1/object/{}/{}",
            self.bucket,
            urlencoding::encode(key)
        ));

        let request = self
            .client
            .post(&url)
            .header("content-type", file.media_type.as_str())
            .header("cache-control", format!("max-age={}", OBJECT_CACHE_CONTROL_SECS))
            .header("x-upsert", "false")
            .body(file.data.clone());

        self.send(request).await?;
        Ok(())
    }

    async fn insert_video(&self, row: &NewVideo) -> StoreResult<VideoRecord> {
        let request = self
            .client
            .post(self.table_url(VIDEOS_TABLE))
            .header("Prefer", "return=representation")
            .json(&[row]);

        let rows: Vec<VideoRecord> = self.send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    /// Read-then-write fallback used when the atomic RPC is unavailable.
    async fn increment_views_fallback(&self, id: Uuid) -> StoreResult<u64> {
        let video = self
            .get_video(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("video {}", id)))?;
        let views = video.views.saturating_add(1);

        let request = self
            .client
            .patch(self.table_url(VIDEOS_TABLE))
            .query(&[("id", format!("eq.{}", id))])
            .json(&serde_json::json!({ "views": views }));
        self.send(request).await?;
        Ok(views)
    }
}

/// Turn a non-success response into a `Rejected` error carrying the backend's
/// own message when the body has one.
async fn rejection(response: Response) -> StoreError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| {
            ["message", "error_description", "error", "msg"]
                .iter()
                .find_map(|field| body.get(*field).and_then(|v| v.as_str()).map(String::from))
        })
        .filter(|m| !m.trim().is_empty())
        .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    StoreError::Rejected(message)
}

#[async_trait]
impl MediaStore for RestStore {
    async fn upload(
        &self,
        file: &VideoFile,
        title: &str,
        description: &str,
    ) -> StoreResult<VideoRecord> {
        let start = Instant::now();
        let key = keys::new_object_key(&file.name);
        keys::validate_object_key(&key)?;

        let row = NewVideo::new(title, description, self.public_url(&key));
        Tables::check_video(&row)?;

        self.put_object(&key, file).await?;
        let record = self.insert_video(&row).await?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            video_id = %record.id,
            size_bytes = file.size(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rest store upload successful"
        );

        Ok(record)
    }

    async fn list_videos(&self) -> StoreResult<Vec<VideoRecord>> {
        let request = self
            .client
            .get(self.table_url(VIDEOS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.send_json(request).await
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Option<VideoRecord>> {
        let request = self
            .client
            .get(self.table_url(VIDEOS_TABLE))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        let rows: Vec<VideoRecord> = self.send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<()> {
        let request = self
            .client
            .post(self.build_url(&format!("/rest/v1/rpc/{}", INCREMENT_VIEWS_RPC)))
            .json(&serde_json::json!({ "video_id": id }));

        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(
                    video_id = %id,
                    error = %e,
                    "increment_views RPC failed, falling back to read-then-write"
                );
                let views = self.increment_views_fallback(id).await?;
                tracing::debug!(video_id = %id, views = views, "View count incremented");
                Ok(())
            }
        }
    }

    async fn list_comments(&self, video_id: Uuid) -> StoreResult<Vec<CommentRecord>> {
        let request = self.client.get(self.table_url(COMMENTS_TABLE)).query(&[
            ("select", "*".to_string()),
            ("video_id", format!("eq.{}", video_id)),
            ("order", "created_at.desc".to_string()),
        ]);
        self.send_json(request).await
    }

    async fn add_comment(&self, comment: &NewComment) -> StoreResult<CommentRecord> {
        let request = self
            .client
            .post(self.table_url(COMMENTS_TABLE))
            .header("Prefer", "return=representation")
            .json(&[comment]);

        let rows: Vec<CommentRecord> = self.send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Rest
    }
}
