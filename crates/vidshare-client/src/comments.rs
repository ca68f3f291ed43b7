//! Comment thread under a video: the listing plus the comment form.

use std::sync::Arc;

use uuid::Uuid;
use vidshare_core::validation::validate_comment;
use vidshare_core::{AppError, CommentRecord, ErrorMetadata, NewComment};
use vidshare_storage::MediaStore;

pub struct CommentThread {
    store: Arc<dyn MediaStore>,
    video_id: Uuid,
    comments: Vec<CommentRecord>,
    author: String,
    text: String,
    error: Option<String>,
}

impl CommentThread {
    pub fn new(store: Arc<dyn MediaStore>, video_id: Uuid, comments: Vec<CommentRecord>) -> Self {
        CommentThread {
            store,
            video_id,
            comments,
            author: String::new(),
            text: String::new(),
            error: None,
        }
    }

    pub fn video_id(&self) -> Uuid {
        self.video_id
    }

    /// Newest first.
    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Clear both form fields and any error.
    pub fn reset_form(&mut self) {
        self.author.clear();
        self.text.clear();
        self.error = None;
    }

    /// Refetch the listing from the store.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        self.comments = self.store.list_comments(self.video_id).await?;
        Ok(())
    }

    /// Post the form as a new comment.
    ///
    /// The text is cleared on success while the author is kept for the next
    /// comment. Taking `&mut self` rules out a second submission while one is
    /// in flight.
    pub async fn submit(&mut self) -> Result<CommentRecord, AppError> {
        if let Err(e) = validate_comment(&self.author, &self.text) {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        let comment = NewComment::new(self.video_id, self.author.trim(), self.text.trim());
        let record = match self.store.add_comment(&comment).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    video_id = %self.video_id,
                    error = %e,
                    "Failed to add comment"
                );
                let err = AppError::from(e);
                self.error = Some(err.client_message());
                return Err(err);
            }
        };

        self.text.clear();
        self.error = None;

        if let Err(e) = self.reload().await {
            tracing::warn!(
                video_id = %self.video_id,
                error = %e,
                "Failed to reload comments, showing the new comment locally"
            );
            self.comments.insert(0, record.clone());
        }

        Ok(record)
    }
}
