use std::mem;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use vidshare_core::constants::{GENERIC_UPLOAD_ERROR, PROGRESS_DONE, PROGRESS_START};
use vidshare_core::validation::{validate_submission, validate_video_file, FileChannel};
use vidshare_core::{AppError, UploadSettings, ValidationError, VideoFile, VideoRecord};
use vidshare_storage::{MediaStore, StoreError};

use super::draft::UploadDraft;
use super::observer::{NoOpUploadObserver, UploadObserver};
use super::progress::ProgressTicker;
use super::state::UploadState;

/// Pointer events from the drop zone.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<VideoFile>),
}

/// One upload dialog: file selection, validation, submission and reset.
///
/// `submit` borrows the workflow mutably for the whole commit, so nothing else
/// (including `cancel`) can touch the draft while a submission is in flight.
pub struct UploadWorkflow {
    store: Arc<dyn MediaStore>,
    observer: Arc<dyn UploadObserver>,
    settings: UploadSettings,
    state: UploadState,
    draft: UploadDraft,
    progress: Arc<watch::Sender<u8>>,
}

impl UploadWorkflow {
    pub fn new(store: Arc<dyn MediaStore>, settings: UploadSettings) -> Self {
        let (progress, _) = watch::channel(0);
        UploadWorkflow {
            store,
            observer: Arc::new(NoOpUploadObserver),
            settings,
            state: UploadState::Idle,
            draft: UploadDraft::default(),
            progress: Arc::new(progress),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn UploadObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.draft.error()
    }

    /// Current progress, 0 to 100.
    pub fn progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Follow progress updates, including the ticks produced during a commit.
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    fn transition(&mut self, next: UploadState) {
        let from = self.state;
        debug_assert!(
            from.can_transition_to(next),
            "invalid upload transition {} -> {}",
            from,
            next
        );
        self.state = next;
        tracing::debug!(from = %from, to = %next, "Upload state changed");
        self.observer.on_state_change(from, next);
    }

    /// Open the dialog.
    pub fn open(&mut self) {
        if self.state == UploadState::Idle {
            self.transition(UploadState::Selecting);
        }
    }

    /// File picker result. `None` means the picker closed without a file.
    pub fn select_file(&mut self, file: Option<VideoFile>) -> Result<(), ValidationError> {
        self.ingest(file, FileChannel::Picker)
    }

    pub fn handle_drag(&mut self, event: DragEvent) -> Result<(), ValidationError> {
        if !self.state.is_interactive() {
            return Ok(());
        }

        match event {
            DragEvent::Enter | DragEvent::Over => {
                self.draft.set_drag_active(true);
                Ok(())
            }
            DragEvent::Leave => {
                self.draft.set_drag_active(false);
                Ok(())
            }
            DragEvent::Drop(files) => {
                self.draft.set_drag_active(false);
                match files.into_iter().next() {
                    Some(file) => self.ingest(Some(file), FileChannel::Drop),
                    None => Ok(()),
                }
            }
        }
    }

    /// Both ingestion channels end up here.
    fn ingest(
        &mut self,
        file: Option<VideoFile>,
        channel: FileChannel,
    ) -> Result<(), ValidationError> {
        if self.state == UploadState::Idle {
            self.transition(UploadState::Selecting);
        }
        self.transition(UploadState::Validating);

        match validate_video_file(file, channel) {
            Ok(file) => {
                tracing::debug!(
                    name = %file.name,
                    media_type = %file.media_type,
                    size_bytes = file.size(),
                    "Video file accepted"
                );
                self.draft.attach(file);
                self.draft.clear_error();
                self.transition(UploadState::Ready);
                Ok(())
            }
            Err(e) => {
                self.draft.detach();
                self.draft.set_error(e.to_string());
                self.transition(UploadState::Rejected);
                self.transition(UploadState::Selecting);
                Err(e)
            }
        }
    }

    /// Drop the selected file and go back to choosing one.
    pub fn clear_file(&mut self) {
        if self.state == UploadState::Ready {
            self.draft.detach();
            self.transition(UploadState::Selecting);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft.set_title(title);
    }

    pub fn set_description(&mut self, description: &str) {
        self.draft.set_description(description);
    }

    /// Discard the draft and close the dialog.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        if self.state == UploadState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.draft = UploadDraft::default();
        self.progress.send_replace(0);
        if self.state != UploadState::Idle {
            self.transition(UploadState::Idle);
        }
    }

    /// Validate the draft and commit it to the store.
    ///
    /// On success the final progress is held for the configured duration
    /// before the draft resets and the observer hears about the new record.
    /// On failure the store's message is kept as the draft error, progress
    /// drops to zero and the draft stays ready for another attempt.
    pub async fn submit(&mut self) -> Result<VideoRecord, AppError> {
        if let Err(e) = validate_submission(self.draft.file(), self.draft.title()) {
            self.draft.set_error(e.to_string());
            return Err(e.into());
        }
        let file = match self.draft.file() {
            Some(file) => file.clone(),
            None => return Err(ValidationError::MissingFileOrTitle.into()),
        };
        let title = self.draft.title().trim().to_string();
        let description = self.draft.description().to_string();

        self.transition(UploadState::Submitting);
        self.draft.clear_error();
        self.progress.send_replace(PROGRESS_START);

        SubmitGuard {
            workflow: self,
            pending: Pending::Commit,
        }
        .run(file, title, description)
        .await
    }

    fn fail(&mut self, message: String) {
        self.progress.send_replace(0);
        self.draft.set_error(message);
        self.transition(UploadState::Failed);
        self.transition(UploadState::Ready);
    }

    /// Settle a committed upload without waiting out the success hold.
    fn conclude(&mut self, record: &VideoRecord) {
        if self.state == UploadState::Submitting {
            self.progress.send_replace(PROGRESS_DONE);
            self.transition(UploadState::Succeeded);
        }
        self.finish(record);
    }

    fn finish(&mut self, record: &VideoRecord) {
        self.reset();
        self.observer.on_complete(record);
    }
}

enum Pending {
    Commit,
    Committed(VideoRecord),
    Rejected(String),
    Done,
}

/// Keeps the workflow consistent when a submit future is dropped part way.
///
/// Dropped during the commit, the attempt counts as failed (the outcome is
/// unknown). Once the store has answered, its answer is applied right away.
struct SubmitGuard<'a> {
    workflow: &'a mut UploadWorkflow,
    pending: Pending,
}

impl SubmitGuard<'_> {
    async fn run(
        mut self,
        file: VideoFile,
        title: String,
        description: String,
    ) -> Result<VideoRecord, AppError> {
        let start = Instant::now();
        let settings = self.workflow.settings.clone();
        let ticker = ProgressTicker::start(
            self.workflow.progress.clone(),
            settings.tick(),
            CancellationToken::new(),
        );

        let result = self
            .workflow
            .store
            .upload(&file, &title, &description)
            .await;

        self.pending = match &result {
            Ok(record) => Pending::Committed(record.clone()),
            Err(e) => Pending::Rejected(failure_message(e)),
        };

        // The ticker must be gone before any terminal progress is written.
        ticker.stop().await;

        match result {
            Ok(record) => {
                tracing::info!(
                    video_id = %record.id,
                    title = %record.title,
                    size_bytes = file.size(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Video uploaded"
                );

                self.workflow.progress.send_replace(PROGRESS_DONE);
                self.workflow.transition(UploadState::Succeeded);

                tokio::time::sleep(settings.success_hold()).await;

                self.pending = Pending::Done;
                self.workflow.finish(&record);
                Ok(record)
            }
            Err(e) => {
                let message = failure_message(&e);

                tracing::warn!(
                    error = %message,
                    backend = %self.workflow.store.backend_type(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Video upload failed"
                );

                self.pending = Pending::Done;
                self.workflow.fail(message.clone());
                Err(AppError::Store(message))
            }
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        match mem::replace(&mut self.pending, Pending::Done) {
            Pending::Commit => {
                tracing::warn!("Upload abandoned before the store answered");
                self.workflow.fail(GENERIC_UPLOAD_ERROR.to_string());
            }
            Pending::Committed(record) => self.workflow.conclude(&record),
            Pending::Rejected(message) => self.workflow.fail(message),
            Pending::Done => {}
        }
    }
}

fn failure_message(err: &StoreError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_UPLOAD_ERROR.to_string()
    } else {
        message
    }
}
