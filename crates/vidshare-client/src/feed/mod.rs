//! Home feed: fetch every video once and present a mixed ordering of them.

mod composer;
mod random;

pub use composer::{compose_feed, FeedView};
pub use random::{RandomSource, RngSource, ScriptedSource};

use std::sync::Arc;
use std::time::Instant;

use vidshare_core::constants::FEED_LOAD_ERROR;
use vidshare_storage::MediaStore;

/// What the home screen shows after a load attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// The store holds no videos yet.
    Empty,
    Ready(FeedView),
    /// Loading failed; calling `load` again retries.
    Failed { message: String },
}

pub struct FeedService {
    store: Arc<dyn MediaStore>,
}

impl FeedService {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        FeedService { store }
    }

    /// Fetch all videos and compose the feed with draws from `random`.
    pub async fn load<R>(&self, random: &mut R) -> FeedState
    where
        R: RandomSource + ?Sized,
    {
        let start = Instant::now();

        let records = match self.store.list_videos().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backend = %self.store.backend_type(),
                    "Failed to load videos"
                );
                return FeedState::Failed {
                    message: FEED_LOAD_ERROR.to_string(),
                };
            }
        };

        let feed = compose_feed(&records, random);

        tracing::debug!(
            count = feed.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Feed composed"
        );

        if feed.is_empty() {
            FeedState::Empty
        } else {
            FeedState::Ready(feed)
        }
    }
}
