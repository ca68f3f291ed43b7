//! Upload dialog workflow
//!
//! A draft moves through `Idle -> Selecting -> Validating -> Ready ->
//! Submitting` and ends either back in `Ready` with an error (failed commit)
//! or in `Succeeded`, which resets to `Idle` after a short hold. Progress
//! during the commit is cosmetic: a ticker advances it while the store works.

mod draft;
mod observer;
mod progress;
mod state;
mod workflow;

pub use draft::UploadDraft;
pub use observer::{NoOpUploadObserver, UploadObserver};
pub use state::UploadState;
pub use workflow::{DragEvent, UploadWorkflow};
