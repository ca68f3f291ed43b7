//! Vidshare Core Library
//!
//! This crate provides core domain models, error types, configuration, and validation
//! that are shared across all vidshare components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, StoreSettings, UploadSettings};
pub use error::{AppError, ErrorMetadata, LogLevel, ValidationError};
pub use models::{CommentRecord, NewComment, NewVideo, VideoFile, VideoRecord};
pub use store_types::StoreBackend;
