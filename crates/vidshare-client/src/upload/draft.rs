use vidshare_core::constants::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};
use vidshare_core::validation::clamp_chars;
use vidshare_core::VideoFile;

/// Everything the upload dialog has collected so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDraft {
    file: Option<VideoFile>,
    title: String,
    description: String,
    error: Option<String>,
    drag_active: bool,
}

impl UploadDraft {
    pub fn file(&self) -> Option<&VideoFile> {
        self.file.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Last user-visible error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set while a drag hovers the drop zone.
    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub(crate) fn attach(&mut self, file: VideoFile) {
        self.file = Some(file);
    }

    pub(crate) fn detach(&mut self) {
        self.file = None;
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.title = clamp_chars(title, TITLE_MAX_CHARS);
    }

    pub(crate) fn set_description(&mut self, description: &str) {
        self.description = clamp_chars(description, DESCRIPTION_MAX_CHARS);
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_description_are_clamped() {
        let mut draft = UploadDraft::default();
        draft.set_title(&"t".repeat(150));
        draft.set_description(&"é".repeat(600));
        assert_eq!(draft.title().chars().count(), 100);
        assert_eq!(draft.description().chars().count(), 500);
    }
}
