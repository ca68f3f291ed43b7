#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::watch;
use uuid::Uuid;
use vidshare_client::{UploadObserver, UploadState};
use vidshare_core::{CommentRecord, NewComment, NewVideo, StoreBackend, VideoFile, VideoRecord};
use vidshare_storage::{MediaStore, StoreError, StoreResult};

/// Store double with scripted failures and call counters.
#[derive(Default)]
pub struct MockStore {
    videos: Mutex<Vec<VideoRecord>>,
    comments: Mutex<Vec<CommentRecord>>,
    upload_error: Option<String>,
    upload_delay: Duration,
    fail_list_videos: bool,
    fail_get_video: bool,
    fail_increment: bool,
    fail_list_comments: bool,
    fail_add_comment: Option<String>,
    pub upload_calls: AtomicUsize,
    pub increment_calls: AtomicUsize,
    pub list_comment_calls: AtomicUsize,
    pub add_comment_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_videos(self, videos: Vec<VideoRecord>) -> Self {
        *self.videos.lock().unwrap() = videos;
        self
    }

    pub fn with_comments(self, comments: Vec<CommentRecord>) -> Self {
        *self.comments.lock().unwrap() = comments;
        self
    }

    pub fn failing_upload(mut self, message: &str) -> Self {
        self.upload_error = Some(message.to_string());
        self
    }

    pub fn with_upload_delay(mut self, delay: Duration) -> Self {
        self.upload_delay = delay;
        self
    }

    pub fn failing_list_videos(mut self) -> Self {
        self.fail_list_videos = true;
        self
    }

    pub fn failing_get_video(mut self) -> Self {
        self.fail_get_video = true;
        self
    }

    pub fn failing_increment(mut self) -> Self {
        self.fail_increment = true;
        self
    }

    pub fn failing_list_comments(mut self) -> Self {
        self.fail_list_comments = true;
        self
    }

    pub fn failing_add_comment(mut self, message: &str) -> Self {
        self.fail_add_comment = Some(message.to_string());
        self
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn views_of(&self, id: Uuid) -> Option<u64> {
        self.videos
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.views)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl MediaStore for MockStore {
    async fn upload(
        &self,
        file: &VideoFile,
        title: &str,
        description: &str,
    ) -> StoreResult<VideoRecord> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if !self.upload_delay.is_zero() {
            tokio::time::sleep(self.upload_delay).await;
        }
        if let Some(message) = &self.upload_error {
            return Err(StoreError::Rejected(message.clone()));
        }

        let url = format!("http://cdn.test/videos/1-{}", file.name);
        let record = NewVideo::new(title, description, url).into_record(Uuid::new_v4(), Utc::now());
        self.videos.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_videos(&self) -> StoreResult<Vec<VideoRecord>> {
        if self.fail_list_videos {
            return Err(StoreError::Request("connection refused".to_string()));
        }
        Ok(self.videos.lock().unwrap().clone())
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Option<VideoRecord>> {
        if self.fail_get_video {
            return Err(StoreError::Request("connection reset".to_string()));
        }
        Ok(self.videos.lock().unwrap().iter().find(|v| v.id == id).cloned())
    }

    async fn increment_views(&self, id: Uuid) -> StoreResult<()> {
        self.increment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_increment {
            return Err(StoreError::Rejected("permission denied".to_string()));
        }
        let mut videos = self.videos.lock().unwrap();
        match videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                video.views += 1;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("video {}", id))),
        }
    }

    async fn list_comments(&self, video_id: Uuid) -> StoreResult<Vec<CommentRecord>> {
        self.list_comment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list_comments {
            return Err(StoreError::Request("timeout".to_string()));
        }
        let mut comments: Vec<CommentRecord> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn add_comment(&self, comment: &NewComment) -> StoreResult<CommentRecord> {
        self.add_comment_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_add_comment {
            return Err(StoreError::Rejected(message.clone()));
        }
        let record = comment.clone().into_record(Uuid::new_v4(), Utc::now());
        self.comments.lock().unwrap().push(record.clone());
        Ok(record)
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

/// Remembers every transition together with the progress at that moment.
pub struct RecordingObserver {
    progress: watch::Receiver<u8>,
    pub transitions: Mutex<Vec<(UploadState, UploadState, u8)>>,
    pub completed: Mutex<Vec<VideoRecord>>,
}

impl RecordingObserver {
    pub fn new(progress: watch::Receiver<u8>) -> Arc<Self> {
        Arc::new(RecordingObserver {
            progress,
            transitions: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        })
    }

    pub fn progress_on_entering(&self, state: UploadState) -> Option<u8> {
        self.transitions
            .lock()
            .unwrap()
            .iter()
            .find(|(_, to, _)| *to == state)
            .map(|(_, _, progress)| *progress)
    }

    pub fn states(&self) -> Vec<UploadState> {
        self.transitions
            .lock()
            .unwrap()
            .iter()
            .map(|(_, to, _)| *to)
            .collect()
    }
}

impl UploadObserver for RecordingObserver {
    fn on_state_change(&self, from: UploadState, to: UploadState) {
        let progress = *self.progress.borrow();
        self.transitions.lock().unwrap().push((from, to, progress));
    }

    fn on_complete(&self, record: &VideoRecord) {
        self.completed.lock().unwrap().push(record.clone());
    }
}

pub fn video_file(name: &str) -> VideoFile {
    VideoFile::new(name, "video/mp4", vec![0u8; 2048])
}

pub fn image_file(name: &str) -> VideoFile {
    VideoFile::new(name, "image/png", vec![0u8; 64])
}

pub fn record(n: u128, age_days: i64, views: u64) -> VideoRecord {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    VideoRecord {
        id: Uuid::from_u128(n),
        title: format!("video {}", n),
        description: None,
        video_url: format!("http://cdn.test/videos/{}.mp4", n),
        thumbnail_url: None,
        views,
        created_at: base - chrono::Duration::days(age_days),
    }
}

pub fn comment(video_id: Uuid, author: &str, text: &str, minutes_ago: i64) -> CommentRecord {
    CommentRecord {
        id: Uuid::new_v4(),
        video_id,
        author: author.to_string(),
        text: text.to_string(),
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}
