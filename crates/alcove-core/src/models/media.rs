//! Media library model

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{local_id, unix_timestamp_millis};

/// Kind of media stored in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Video clip
    Video,
}

/// An item in the local media library. Content is stored inline as a data
/// URL, so the library needs no companion file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Record identifier
    pub id: String,
    /// Display name, usually the source file name
    pub name: String,
    /// Image or video
    pub kind: MediaKind,
    /// Folder name for grouping
    pub folder: String,
    /// `data:<mime>;base64,...` payload
    pub data_url: String,
    /// Import timestamp (Unix ms)
    pub created_at: i64,
}

impl MediaItem {
    /// Build a media item from raw file bytes. The MIME type is guessed from
    /// the file name; anything that is not an image or video is rejected.
    pub fn from_bytes(path: &Path, bytes: &[u8], folder: impl Into<String>) -> Result<Self> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let kind = match mime.type_() {
            mime_guess::mime::IMAGE => MediaKind::Image,
            mime_guess::mime::VIDEO => MediaKind::Video,
            _ => {
                return Err(Error::InvalidInput(format!(
                    "unsupported media type: {mime}"
                )));
            }
        };
        let name = path
            .file_name()
            .map_or_else(|| "untitled".to_string(), |n| n.to_string_lossy().to_string());
        let folder: String = folder.into();
        let folder = folder.trim();

        Ok(Self {
            id: local_id("media-"),
            name,
            kind,
            folder: if folder.is_empty() {
                "Library".to_string()
            } else {
                folder.to_string()
            },
            data_url: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
            created_at: unix_timestamp_millis(),
        })
    }
}
