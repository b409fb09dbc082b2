//! Types for speech processing

/// An audio file as received from the client, passed through to the
/// provider without transcoding.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    data: Vec<u8>,
    filename: String,
    mime_type: String,
}

impl AudioUpload {
    /// Create a new audio upload
    pub fn new(data: Vec<u8>, filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Get the raw audio bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the original filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get the size of the audio data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Map a synthesis format name to the media type of the produced audio.
///
/// Unrecognized formats are still forwarded to the provider; the response
/// is then served as a generic binary payload. Matching is case-insensitive.
pub fn media_type(format: &str) -> &'static str {
    match format.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
