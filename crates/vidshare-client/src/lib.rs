//! Vidshare Client Library
//!
//! The behavior behind the video-sharing screens: composing the home feed,
//! driving one upload from file selection to commit, opening a video for
//! watching and posting comments. Every component receives its media store as
//! an injected `Arc<dyn MediaStore>`.

pub mod comments;
pub mod feed;
pub mod format;
pub mod upload;
pub mod watch;

// Re-export commonly used types
pub use comments::CommentThread;
pub use feed::{
    compose_feed, FeedService, FeedState, FeedView, RandomSource, RngSource, ScriptedSource,
};
pub use upload::{
    DragEvent, NoOpUploadObserver, UploadDraft, UploadObserver, UploadState, UploadWorkflow,
};
pub use watch::{WatchPage, WatchService};
