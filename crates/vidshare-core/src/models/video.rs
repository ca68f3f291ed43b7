use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

/// A persisted video as delivered by the store.
///
/// The client only ever holds read-only snapshots; the store owns the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Public locator of the stored binary.
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

/// Row inserted by the commit operation once the binary is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewVideo {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub views: u64,
}

impl NewVideo {
    /// Build the row for a freshly stored object. Views always start at zero and
    /// a blank description is stored as absent.
    pub fn new(title: &str, description: &str, video_url: String) -> Self {
        let description = description.trim();
        NewVideo {
            title: title.trim().chars().take(TITLE_MAX_CHARS).collect(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.chars().take(DESCRIPTION_MAX_CHARS).collect())
            },
            video_url,
            thumbnail_url: None,
            views: 0,
        }
    }

    /// Materialize the row with store-assigned identity and timestamp.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> VideoRecord {
        VideoRecord {
            id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            views: self.views,
            created_at,
        }
    }
}
