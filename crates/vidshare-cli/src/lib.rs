use std::path::Path;

use chrono::{DateTime, Utc};
use vidshare_client::format::{format_card_age, format_comment_age, format_views};
use vidshare_core::{CommentRecord, VideoRecord};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Media type declared for a local file, from its extension.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("m4v") => "video/x-m4v",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("ogv") => "video/ogg",
        Some("mpeg") | Some("mpg") => "video/mpeg",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// One feed card as a line: `id  title  12.3K views • 2 days ago`.
pub fn feed_line(video: &VideoRecord, now: DateTime<Utc>) -> String {
    format!(
        "{}  {:<40}  {} views • {}",
        video.id,
        truncate_string(&video.title, 40),
        format_views(video.views),
        format_card_age(video.created_at, now)
    )
}

pub fn comment_line(comment: &CommentRecord, now: DateTime<Utc>) -> String {
    format!(
        "{} ({}): {}",
        comment.author,
        format_comment_age(comment.created_at, now),
        comment.text
    )
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
