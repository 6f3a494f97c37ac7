//! Wire contract of the upscale service.
//!
//! Three endpoints: `GET scale-factors`, `POST upscale` (multipart), and
//! `GET download/{output_file}`. The upscale response body is either a
//! completion record or a bare `{ "error": ... }` object, so it is modelled
//! as an untagged enum and discriminated by shape.

use serde::{Deserialize, Serialize};

use crate::domain::ArtifactId;

/// Multipart field names for `POST upscale`.
pub const FIELD_FILE: &str = "file";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_SCALE_FACTOR: &str = "scale_factor";
pub const FIELD_TARGET_WIDTH: &str = "target_width";
pub const FIELD_TARGET_HEIGHT: &str = "target_height";

/// Body of `GET scale-factors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleFactorsResponse {
    pub scale_factors: Vec<u32>,
}

/// Successful completion record from `POST upscale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleCompleted {
    pub success: bool,
    pub output_file: String,
    pub message: String,
    pub original_size: String,
    pub upscaled_size: String,
}

/// Rejection body from `POST upscale`; also carried on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleRejected {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpscaleResponse {
    Completed(UpscaleCompleted),
    Rejected(UpscaleRejected),
}

/// Relative location of a processed artifact, served by `GET download/{id}`.
pub fn download_path(artifact_id: &ArtifactId) -> String {
    format!("download/{}", artifact_id.as_str())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
