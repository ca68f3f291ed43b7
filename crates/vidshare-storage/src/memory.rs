use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;
use vidshare_core::{CommentRecord, NewComment, NewVideo, StoreBackend, VideoFile, VideoRecord};

use crate::keys;
use crate::tables::Tables;
use crate::traits::{MediaStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredObject {
    media_type: String,
    data: Bytes,
}

/// In-memory media store
///
/// Objects and table rows live in process memory. Used for development and
/// as the collaborator in tests.
pub struct MemoryStore {
    base_url: String,
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new MemoryStore
    ///
    /// # Arguments
    /// * `base_url` - Base URL used to build public object URLs (e.g., "http://localhost:3000/storage")
    /// * `bucket` - Bucket name that prefixes every object URL
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        MemoryStore {
            base_url: base_url.into(),
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Insert a fully formed record, keeping its id, views and timestamp.
    pub async fn insert_record(&self, record: VideoRecord) {
        self.tables.write().await.insert_record(record);
    }

    /// Stored payload and declared media type of an object, if present.
    pub async fn object(&self, key: &str) -> Option<(String, Bytes)> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| (o.media_type.clone(), o.data.clone()))
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new(
            "http://localhost:3000/storage",
            vidshare_core::constants::DEFAULT_BUCKET,
        )
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn upload(
        &self,
        file: &VideoFile,
        title: &str,
        description: &str,
    ) -> StoreResult<VideoRecord> {
        let start = Instant::now();
        let key = keys::new_object_key(&file.name);
        keys::validate_object_key(&key)?;

        let url = keys::object_url(&self.base_url, &self.bucket, &key);
        let row = NewVideo::new(title, description, url);
        Tables::check_video(&row)?;

        {
            let mut objects = self.objects.write().await;
            if objects.contains_key(&key) {
                return Err(StoreError::Rejected("The resource already exists".to_string()));
            }
            objects.insert(
                key.clone(),
                StoredObject {
                    media_type: file.media_type.clone(),
                    data: file.data.clone(),
                },
            );
        }

        let record = self.tables.write().await.insert_video(row)?;

        tracing::info!(
            key = %key,
            video_id = %record.id,
            size_bytes = file.size(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Memory store upload successful"
        );

        Ok(record)
    }

    async fn list_videos(&self) -> StoreResult<Vec<VideoRecord>> {
        Ok(self.tables.read().await.videos_newest_first())
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Option<VideoRecord>> {
        Ok(self.tables.read().await.video(id))
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<()> {
        let views = self.tables.write().await.increment_views(id)?;
        tracing::debug!(video_id = %id, views = views, "View count incremented");
        Ok(())
    }

    async fn list_comments(&self, video_id: Uuid) -> StoreResult<Vec<CommentRecord>> {
        Ok(self.tables.read().await.comments_newest_first(video_id))
    }

    async fn add_comment(&self, comment: &NewComment) -> StoreResult<CommentRecord> {
        let record = self.tables.write().await.insert_comment(comment.clone())?;
        tracing::debug!(video_id = %record.video_id, comment_id = %record.id, "Comment added");
        Ok(record)
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
