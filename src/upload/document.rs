use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::errors::ClientError;
use crate::utils::mime::is_json_file;
use crate::utils::text::truncate_chars;

/// Number of characters of pretty-printed JSON shown before upload.
pub const PREVIEW_CHARS: usize = 1000;

/// A local JSON file that parsed successfully and is ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub name: String,
    pub size: u64,
    pub data: Value,
}

impl LoadedDocument {
    /// Reads and parses the file at `path`. Files that do not look like JSON
    /// are refused before they are read.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        if !is_json_file(path) {
            return Err(ClientError::UnsupportedFileType(name));
        }

        let bytes = std::fs::read(path)?;
        Self::from_bytes(name, &bytes)
    }

    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ClientError> {
        let data: Value = serde_json::from_slice(bytes)?;
        let name = name.into();
        info!(file = %name, size = bytes.len(), "Loaded upload document");

        Ok(Self {
            name,
            size: bytes.len() as u64,
            data,
        })
    }

    /// File size in KiB, as shown to the user.
    #[must_use]
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    #[must_use]
    pub fn preview(&self) -> String {
        preview(&self.data, PREVIEW_CHARS)
    }
}

/// Pretty-prints `data` with two-space indentation and keeps the first
/// `max_chars` characters.
#[must_use]
pub fn preview(data: &Value, max_chars: usize) -> String {
    let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    truncate_chars(&pretty, max_chars).to_string()
}
