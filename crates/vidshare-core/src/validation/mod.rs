//! Validation modules

pub mod input;

pub use input::{
    clamp_chars, validate_comment, validate_submission, validate_video_file, FileChannel,
};
