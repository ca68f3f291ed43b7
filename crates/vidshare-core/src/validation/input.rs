//! Input validation for the upload dialog and the comment form
//!
//! Everything here runs before the store is contacted:
//! - File acceptance: declared media type must start with `video/`
//! - Submission: a file and a non-blank title are required
//! - Comments: author and text must both be non-blank
//! - Text inputs are clamped to their maximum length in code points

use crate::error::ValidationError;
use crate::models::VideoFile;

/// How a candidate file reached the dialog. Both channels share one validation
/// path; only the rejection wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChannel {
    Picker,
    Drop,
}

impl FileChannel {
    fn rejection(self) -> ValidationError {
        match self {
            FileChannel::Picker => ValidationError::InvalidSelectedFile,
            FileChannel::Drop => ValidationError::InvalidDroppedFile,
        }
    }
}

/// Accept a candidate file only when its declared media type is a video.
/// A picker that closes without a file counts as an invalid selection.
pub fn validate_video_file(
    file: Option<VideoFile>,
    channel: FileChannel,
) -> Result<VideoFile, ValidationError> {
    match file {
        Some(file) if file.is_video() => Ok(file),
        _ => Err(channel.rejection()),
    }
}

/// Preconditions checked before any commit is attempted.
pub fn validate_submission(file: Option<&VideoFile>, title: &str) -> Result<(), ValidationError> {
    if file.is_none() || title.trim().is_empty() {
        return Err(ValidationError::MissingFileOrTitle);
    }
    Ok(())
}

pub fn validate_comment(author: &str, text: &str) -> Result<(), ValidationError> {
    if author.trim().is_empty() || text.trim().is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}

/// Truncate to at most `max` code points, as a length-limited text input does.
pub fn clamp_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoFile {
        VideoFile::new("clip.mp4", "video/mp4", vec![0u8; 4])
    }

    #[test]
    fn rejects_non_video_with_channel_message() {
        let png = VideoFile::new("cat.png", "image/png", vec![0u8; 4]);
        assert_eq!(
            validate_video_file(Some(png.clone()), FileChannel::Picker),
            Err(ValidationError::InvalidSelectedFile)
        );
        assert_eq!(
            validate_video_file(Some(png), FileChannel::Drop),
            Err(ValidationError::InvalidDroppedFile)
        );
        assert_eq!(
            validate_video_file(None, FileChannel::Picker),
            Err(ValidationError::InvalidSelectedFile)
        );
    }

    #[test]
    fn accepts_video() {
        assert_eq!(
            validate_video_file(Some(video()), FileChannel::Drop),
            Ok(video())
        );
    }

    #[test]
    fn submission_requires_file_and_title() {
        assert!(validate_submission(None, "title").is_err());
        assert!(validate_submission(Some(&video()), " \t\n").is_err());
        assert!(validate_submission(Some(&video()), " ok ").is_ok());
    }

    #[test]
    fn comment_requires_both_fields() {
        assert_eq!(validate_comment("", "hi"), Err(ValidationError::EmptyComment));
        assert_eq!(validate_comment("ana", "   "), Err(ValidationError::EmptyComment));
        assert!(validate_comment("ana", "hi").is_ok());
    }

    #[test]
    fn clamp_counts_code_points() {
        assert_eq!(clamp_chars("héllo", 2), "hé");
        assert_eq!(clamp_chars("abc", 10), "abc");
    }
}
