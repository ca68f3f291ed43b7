use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment attached to one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub video_id: Uuid,
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "comment_text")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment row to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub video_id: Uuid,
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "comment_text")]
    pub text: String,
}

impl NewComment {
    pub fn new(video_id: Uuid, author: &str, text: &str) -> Self {
        NewComment {
            video_id,
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> CommentRecord {
        CommentRecord {
            id,
            video_id: self.video_id,
            author: self.author,
            text: self.text,
            created_at,
        }
    }
}
