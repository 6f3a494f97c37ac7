use serde::{Deserialize, Serialize};

/// How the user expressed the desired output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpscaleMode {
    Factor,
    Resolution,
}

impl UpscaleMode {
    /// Wire name of the mode, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            UpscaleMode::Factor => "factor",
            UpscaleMode::Resolution => "resolution",
        }
    }
}

/// Identifier of a processed image held by the upscale service.
///
/// Opaque to the client beyond building the download location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
