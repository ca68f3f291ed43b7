//! Media store abstraction trait
//!
//! This module defines the MediaStore trait that all store backends must implement.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use vidshare_core::{AppError, CommentRecord, NewComment, StoreBackend, VideoFile, VideoRecord};

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the operation and said why. Shown to the user as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            StoreError::ConfigError(msg) => AppError::Config(msg),
            other => AppError::Store(other.to_string()),
        }
    }
}

/// Media store abstraction trait
///
/// The feed, upload, watch and comment components only ever talk to the
/// backend through this trait, so they work with any implementation and tests
/// can substitute scripted stores.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Commit a new video: store the binary under a fresh key, resolve its
    /// public URL and insert a row with zero views.
    ///
    /// Either outcome is final for this attempt; implementations never retry.
    async fn upload(
        &self,
        file: &VideoFile,
        title: &str,
        description: &str,
    ) -> StoreResult<VideoRecord>;

    /// All videos. Callers must not rely on the delivered order.
    async fn list_videos(&self) -> StoreResult<Vec<VideoRecord>>;

    /// A single video, or `None` when no row has this id.
    async fn get_video(&self, id: Uuid) -> StoreResult<Option<VideoRecord>>;

    /// Atomically add one view. Best-effort from the viewer's perspective.
    async fn increment_views(&self, id: Uuid) -> StoreResult<()>;

    /// Comments of one video, newest first.
    async fn list_comments(&self, video_id: Uuid) -> StoreResult<Vec<CommentRecord>>;

    async fn add_comment(&self, comment: &NewComment) -> StoreResult<CommentRecord>;

    /// Get the store backend type
    fn backend_type(&self) -> StoreBackend;
}
