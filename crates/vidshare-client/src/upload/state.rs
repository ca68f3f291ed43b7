use std::fmt::{Display, Formatter, Result as FmtResult};

/// Lifecycle of one upload dialog.
///
/// `Validating`, `Rejected` and `Failed` are passed through within a single
/// operation; `Succeeded` lasts for the success hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadState {
    Idle,
    Selecting,
    Validating,
    Rejected,
    Ready,
    Submitting,
    Failed,
    Succeeded,
}

impl UploadState {
    pub fn can_transition_to(self, next: UploadState) -> bool {
        use UploadState::*;

        match (self, next) {
            (Idle, Selecting)
            | (Selecting, Validating)
            | (Ready, Validating)
            | (Ready, Selecting)
            | (Validating, Rejected)
            | (Validating, Ready)
            | (Rejected, Selecting)
            | (Ready, Submitting)
            | (Submitting, Failed)
            | (Submitting, Succeeded)
            | (Failed, Ready) => true,
            // Cancel/reset; an in-flight submission cannot be abandoned.
            (from, Idle) => from != Submitting && from != Idle,
            _ => false,
        }
    }

    /// Whether the dialog accepts input (file, title, cancel) in this state.
    pub fn is_interactive(self) -> bool {
        !matches!(self, UploadState::Submitting | UploadState::Succeeded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::Selecting => "selecting",
            UploadState::Validating => "validating",
            UploadState::Rejected => "rejected",
            UploadState::Ready => "ready",
            UploadState::Submitting => "submitting",
            UploadState::Failed => "failed",
            UploadState::Succeeded => "succeeded",
        }
    }
}

impl Display for UploadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
