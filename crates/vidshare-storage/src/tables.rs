//! In-process `videos` and `comments` tables shared by the memory and local backends.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use vidshare_core::{CommentRecord, NewComment, NewVideo, VideoRecord};

use crate::traits::{StoreError, StoreResult};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Tables {
    #[serde(default)]
    videos: Vec<VideoRecord>,
    #[serde(default)]
    comments: Vec<CommentRecord>,
    #[serde(default)]
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Creation timestamps are strictly increasing even when the wall clock is not.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }

    pub(crate) fn check_video(row: &NewVideo) -> StoreResult<()> {
        row.validate()
            .map_err(|e| StoreError::Rejected(format!("Invalid video row: {}", e)))
    }

    pub(crate) fn insert_video(&mut self, row: NewVideo) -> StoreResult<VideoRecord> {
        Self::check_video(&row)?;
        let created_at = self.next_timestamp();
        let record = row.into_record(Uuid::new_v4(), created_at);
        self.videos.push(record.clone());
        Ok(record)
    }

    /// Insert an already materialized row (fixtures, imports).
    pub(crate) fn insert_record(&mut self, record: VideoRecord) {
        if self
            .last_created_at
            .map_or(true, |last| record.created_at > last)
        {
            self.last_created_at = Some(record.created_at);
        }
        self.videos.retain(|v| v.id != record.id);
        self.videos.push(record);
    }

    pub(crate) fn videos_newest_first(&self) -> Vec<VideoRecord> {
        let mut videos = self.videos.clone();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        videos
    }

    pub(crate) fn video(&self, id: Uuid) -> Option<VideoRecord> {
        self.videos.iter().find(|v| v.id == id).cloned()
    }

    pub(crate) fn increment_views(&mut self, id: Uuid) -> StoreResult<u64> {
        let video = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("video {}", id)))?;
        video.views = video.views.saturating_add(1);
        Ok(video.views)
    }

    pub(crate) fn comments_newest_first(&self, video_id: Uuid) -> Vec<CommentRecord> {
        let mut comments: Vec<CommentRecord> = self
            .comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }

    pub(crate) fn insert_comment(&mut self, comment: NewComment) -> StoreResult<CommentRecord> {
        if !self.videos.iter().any(|v| v.id == comment.video_id) {
            return Err(StoreError::Rejected(format!(
                "Video {} does not exist",
                comment.video_id
            )));
        }
        let created_at = self.next_timestamp();
        let record = comment.into_record(Uuid::new_v4(), created_at);
        self.comments.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> NewVideo {
        NewVideo::new(title, "", format!("http://localhost/videos/{}.mp4", title))
    }

    #[test]
    fn timestamps_strictly_increase() {
        let mut tables = Tables::default();
        let a = tables.insert_video(row("a")).unwrap();
        let b = tables.insert_video(row("b")).unwrap();
        let c = tables.insert_video(row("c")).unwrap();
        assert!(a.created_at < b.created_at);
        assert!(b.created_at < c.created_at);

        let titles: Vec<String> = tables
            .videos_newest_first()
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn increment_unknown_video_is_not_found() {
        let mut tables = Tables::default();
        assert!(matches!(
            tables.increment_views(Uuid::new_v4()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn comment_requires_existing_video() {
        let mut tables = Tables::default();
        let orphan = NewComment::new(Uuid::new_v4(), "ana", "hi");
        assert!(matches!(
            tables.insert_comment(orphan),
            Err(StoreError::Rejected(_))
        ));

        let video = tables.insert_video(row("v")).unwrap();
        let first = tables
            .insert_comment(NewComment::new(video.id, "ana", "first"))
            .unwrap();
        let second = tables
            .insert_comment(NewComment::new(video.id, "bo", "second"))
            .unwrap();
        let listed = tables.comments_newest_first(video.id);
        assert_eq!(listed, vec![second, first]);
    }

    #[test]
    fn invalid_rows_are_rejected() {
        let mut tables = Tables::default();
        assert!(tables.insert_video(row("   ")).is_err());
    }
}
