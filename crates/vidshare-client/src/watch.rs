//! Watch page: one video, its view count and its comment thread.

use std::sync::Arc;

use uuid::Uuid;
use vidshare_core::{AppError, VideoRecord};
use vidshare_storage::MediaStore;

use crate::comments::CommentThread;

pub enum WatchPage {
    NotFound,
    Ready {
        video: VideoRecord,
        comments: CommentThread,
    },
}

impl WatchPage {
    pub fn video(&self) -> Option<&VideoRecord> {
        match self {
            WatchPage::Ready { video, .. } => Some(video),
            WatchPage::NotFound => None,
        }
    }
}

pub struct WatchService {
    store: Arc<dyn MediaStore>,
}

impl WatchService {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        WatchService { store }
    }

    /// Load a video for watching and count the view.
    ///
    /// The fetch, the view increment and the comment listing run concurrently.
    /// A failed increment is only logged and a failed comment listing shows an
    /// empty thread; only a failed video fetch is returned as an error.
    pub async fn open(&self, id: Uuid) -> Result<WatchPage, AppError> {
        let (video, views, comments) = futures::join!(
            self.store.get_video(id),
            self.store.increment_views(id),
            self.store.list_comments(id),
        );

        if let Err(e) = views {
            tracing::warn!(video_id = %id, error = %e, "Failed to increment view count");
        }

        let video = match video? {
            Some(video) => video,
            None => {
                tracing::debug!(video_id = %id, "Video not found");
                return Ok(WatchPage::NotFound);
            }
        };

        let comments = comments.unwrap_or_else(|e| {
            tracing::warn!(video_id = %id, error = %e, "Failed to load comments");
            Vec::new()
        });

        Ok(WatchPage::Ready {
            video,
            comments: CommentThread::new(self.store.clone(), id, comments),
        })
    }
}
