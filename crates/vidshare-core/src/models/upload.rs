use bytes::Bytes;

use crate::constants::VIDEO_MEDIA_TYPE_PREFIX;

/// A file handed to the upload dialog: payload plus what the browser declared.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    /// Original file name as selected by the user.
    pub name: String,
    /// Declared media type (e.g. `video/mp4`). Never sniffed from content.
    pub media_type: String,
    pub data: Bytes,
}

impl VideoFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        VideoFile {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Byte size of the payload.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Type-prefix check on the declared media type.
    pub fn is_video(&self) -> bool {
        self.media_type.starts_with(VIDEO_MEDIA_TYPE_PREFIX)
    }
}
