use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;
use vidshare_core::{CommentRecord, NewComment, NewVideo, StoreBackend, VideoFile, VideoRecord};

use crate::keys;
use crate::tables::Tables;
use crate::traits::{MediaStore, StoreError, StoreResult};

const TABLES_FILE: &str = "tables.json";
const OBJECTS_DIR: &str = "objects";

/// Local filesystem media store
///
/// Objects are written under `{base_path}/objects/{bucket}/` and both tables
/// are persisted as one JSON snapshot, so separate processes pointed at the
/// same directory see the same videos and comments.
pub struct LocalStore {
    base_path: PathBuf,
    base_url: String,
    bucket: String,
    tables: Mutex<Tables>,
}

impl LocalStore {
    /// Create a new LocalStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for objects and the table snapshot (e.g., "/var/lib/vidshare")
    /// * `base_url` - Base URL for serving objects (e.g., "http://localhost:3000/storage")
    /// * `bucket` - Bucket directory name under `objects/`
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        bucket: String,
    ) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(base_path.join(OBJECTS_DIR).join(&bucket))
            .await
            .map_err(|e| {
                StoreError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    base_path.display(),
                    e
                ))
            })?;

        let tables = Self::load_tables(&base_path.join(TABLES_FILE)).await?;

        Ok(LocalStore {
            base_path,
            base_url,
            bucket,
            tables: Mutex::new(tables),
        })
    }

    async fn load_tables(path: &Path) -> StoreResult<Tables> {
        match fs::read(path).await {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Tables::default()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    /// Write the snapshot to a temporary file, then rename it into place.
    async fn persist(&self, tables: &Tables) -> StoreResult<()> {
        let path = self.base_path.join(TABLES_FILE);
        let tmp = self.base_path.join(format!("{}.tmp", TABLES_FILE));
        let raw = serde_json::to_vec_pretty(tables)?;
        fs::write(&tmp, raw).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Apply `change` to a copy of the tables and swap it in only once the
    /// snapshot is on disk. A failed write leaves memory untouched.
    async fn commit<T>(
        &self,
        tables: &mut Tables,
        change: impl FnOnce(&mut Tables) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut next = tables.clone();
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *tables = next;
        Ok(out)
    }

    async fn write_object(mut out: fs::File, path: &Path, data: &[u8]) -> StoreResult<()> {
        out.write_all(data).await.map_err(|e| {
            StoreError::Rejected(format!("Failed to write file {}: {}", path.display(), e))
        })?;
        out.sync_all().await.map_err(|e| {
            StoreError::Rejected(format!("Failed to sync file {}: {}", path.display(), e))
        })
    }

    /// Convert an object key to a filesystem path with security validation
    fn key_to_path(&self, key: &str) -> StoreResult<PathBuf> {
        keys::validate_object_key(key)?;
        Ok(self.base_path.join(OBJECTS_DIR).join(&self.bucket).join(key))
    }

    /// Insert a fully formed record, keeping its id, views and timestamp.
    pub async fn insert_record(&self, record: VideoRecord) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        self.commit(&mut tables, |next| {
            next.insert_record(record);
            Ok(())
        })
        .await
    }

    /// Read back a stored object.
    pub async fn read_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = self.key_to_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(key.to_string())),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }
}

#[async_trait]
impl MediaStore for LocalStore {
    async fn upload(
        &self,
        file: &VideoFile,
        title: &str,
        description: &str,
    ) -> StoreResult<VideoRecord> {
        let key = keys::new_object_key(&file.name);
        let path = self.key_to_path(&key)?;

        let url = keys::object_url(&self.base_url, &self.bucket, &key);
        let row = NewVideo::new(title, description, url);
        Tables::check_video(&row)?;

        let start = Instant::now();

        let out = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(out) => out,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Rejected("The resource already exists".to_string()))
            }
            Err(e) => {
                return Err(StoreError::Rejected(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        // From here on the object file is ours: any failure removes it.
        let committed = match Self::write_object(out, &path, &file.data).await {
            Ok(()) => {
                let mut tables = self.tables.lock().await;
                self.commit(&mut tables, |next| next.insert_video(row)).await
            }
            Err(e) => Err(e),
        };
        let record = match committed {
            Ok(record) => record,
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %cleanup,
                        "Failed to remove object after aborted upload"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            video_id = %record.id,
            size_bytes = file.size(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store upload successful"
        );

        Ok(record)
    }

    async fn list_videos(&self) -> StoreResult<Vec<VideoRecord>> {
        Ok(self.tables.lock().await.videos_newest_first())
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Option<VideoRecord>> {
        Ok(self.tables.lock().await.video(id))
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let views = self
            .commit(&mut tables, |next| next.increment_views(id))
            .await?;
        tracing::debug!(video_id = %id, views = views, "View count incremented");
        Ok(())
    }

    async fn list_comments(&self, video_id: Uuid) -> StoreResult<Vec<CommentRecord>> {
        Ok(self.tables.lock().await.comments_newest_first(video_id))
    }

    async fn add_comment(&self, comment: &NewComment) -> StoreResult<CommentRecord> {
        let mut tables = self.tables.lock().await;
        let record = self
            .commit(&mut tables, |next| next.insert_comment(comment.clone()))
            .await?;
        Ok(record)
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Local
    }
}
