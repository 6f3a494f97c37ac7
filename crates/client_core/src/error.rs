use shared::domain::UpscaleMode;
use thiserror::Error;

/// File rejection reasons, decided before a candidate enters the selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid file type {media_type}; allowed types are PNG, JPG, JPEG, WEBP, BMP")]
    InvalidType { media_type: String },
    #[error("file too large: {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}

/// Rejected selection mutations. `WrongMode` is a caller-discipline guard
/// and should be unreachable from a well-behaved presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("operation requires {} mode", .required.as_str())]
    WrongMode { required: UpscaleMode },
    #[error("scale factor {0} is not offered by the service")]
    UnsupportedFactor(u32),
    #[error("scale factors have not been loaded")]
    FactorsUnavailable,
    #[error("selection is locked while a submission is in flight")]
    SubmissionInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission preconditions not met")]
    NotReady,
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("{0}")]
    ServiceRejected(String),
}

/// Union of the taxonomies for intents that can fail in more than one way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
