//! Data models for the application
//!
//! Records owned by the store (videos, comments) and the client-side file handle
//! used while drafting an upload.

mod comment;
mod upload;
mod video;

pub use comment::*;
pub use upload::*;
pub use video::*;
