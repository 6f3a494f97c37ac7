//! Candidate file validation, applied before anything enters the selection.

use crate::error::ValidationError;

/// Upper bound on the declared file size: 50 MiB, inclusive.
pub const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Media types the upscale service accepts.
pub const ALLOWED_MEDIA_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/webp",
    "image/bmp",
];

/// A file as handed over by the presentation layer, not yet admitted.
///
/// `size_bytes` is the declared size; validation never inspects `contents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub file_name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub contents: Vec<u8>,
}

/// A candidate that passed validation. Construction only via [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFile {
    file_name: String,
    media_type: String,
    size_bytes: u64,
    contents: Vec<u8>,
}

impl ValidFile {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn into_contents(self) -> Vec<u8> {
        self.contents
    }
}

/// Pure accept/reject decision; never partially accepts.
pub fn validate(candidate: FileCandidate) -> Result<ValidFile, ValidationError> {
    let media_type = candidate.media_type.to_ascii_lowercase();
    if !ALLOWED_MEDIA_TYPES.contains(&media_type.as_str()) {
        return Err(ValidationError::InvalidType {
            media_type: candidate.media_type,
        });
    }
    if candidate.size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge {
            size_bytes: candidate.size_bytes,
            limit_bytes: MAX_FILE_SIZE_BYTES,
        });
    }
    Ok(ValidFile {
        file_name: candidate.file_name,
        media_type,
        size_bytes: candidate.size_bytes,
        contents: candidate.contents,
    })
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
