//! Upload notifications for the surrounding screen
//!
//! The screen that hosts the upload dialog implements this trait to refresh
//! its feed or close the dialog. Callbacks run synchronously on the task that
//! drives the workflow.

use vidshare_core::VideoRecord;

use super::state::UploadState;

pub trait UploadObserver: Send + Sync {
    /// Called after every state change.
    fn on_state_change(&self, _from: UploadState, _to: UploadState) {}

    /// Called once the success hold has elapsed and the draft was reset.
    fn on_complete(&self, record: &VideoRecord);
}

/// Observer for callers that only need the returned record.
pub struct NoOpUploadObserver;

impl UploadObserver for NoOpUploadObserver {
    fn on_complete(&self, _record: &VideoRecord) {}
}
