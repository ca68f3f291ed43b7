//! Shared limits and defaults.

/// Maximum title length in code points (matches the title input's max length).
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in code points.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Declared media types accepted for upload must start with this prefix.
pub const VIDEO_MEDIA_TYPE_PREFIX: &str = "video/";

/// Bucket holding uploaded video objects.
pub const DEFAULT_BUCKET: &str = "videos";

/// Cache lifetime advertised for stored objects, in seconds.
pub const OBJECT_CACHE_CONTROL_SECS: u32 = 3600;

/// Progress shown as soon as a submission starts.
pub const PROGRESS_START: u8 = 10;
/// Cosmetic progress added on every ticker wake-up.
pub const PROGRESS_STEP: u8 = 10;
/// The cosmetic ticker never reports more than this.
pub const PROGRESS_CAP: u8 = 90;
/// Progress reported once the store confirms the upload.
pub const PROGRESS_DONE: u8 = 100;

pub const DEFAULT_PROGRESS_TICK_MS: u64 = 500;
pub const DEFAULT_SUCCESS_HOLD_MS: u64 = 1000;

/// Shown when the store fails without a usable reason.
pub const GENERIC_UPLOAD_ERROR: &str = "Upload failed. Please try again.";

/// Shown when the feed cannot be fetched.
pub const FEED_LOAD_ERROR: &str = "Failed to load videos. Please try again later.";
