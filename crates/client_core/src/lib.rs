//! Client-side workflow core for the image upscaling tool.
//!
//! Owns the selection-and-submission state machine: which (file, mode,
//! parameter) combinations are valid, whether the submit action is
//! available, and the lifecycle of an in-flight submission. Rendering and
//! raw input capture stay in the presentation layer; the remote service is
//! reached through the [`UpscaleService`] seam.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{ArtifactId, UpscaleMode},
    protocol,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod error;
pub mod selection;
pub mod transport;
pub mod validate;

pub use error::{SelectionError, SubmissionError, ValidationError, WorkflowError};
pub use selection::{submission_permitted, Selection, MAX_TARGET_DIMENSION};
pub use transport::HttpUpscaleService;
pub use validate::{validate, FileCandidate, ValidFile, MAX_FILE_SIZE_BYTES};

/// Submission lifecycle of one workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Configuring,
    Submitting,
    Succeeded,
    Failed,
}

/// Outcome of a completed submission, valid only while the phase is
/// `Succeeded`. Size labels are opaque display strings from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub artifact_id: ArtifactId,
    pub summary_message: String,
    pub original_size: String,
    pub upscaled_size: String,
}

impl SubmissionResult {
    /// Relative location the processed artifact can be retrieved from.
    pub fn download_path(&self) -> String {
        protocol::download_path(&self.artifact_id)
    }
}

/// Mode-specific parameters captured at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscaleParams {
    Factor { scale_factor: u32 },
    Resolution { target_width: u32, target_height: u32 },
}

impl UpscaleParams {
    pub fn mode(&self) -> UpscaleMode {
        match self {
            UpscaleParams::Factor { .. } => UpscaleMode::Factor,
            UpscaleParams::Resolution { .. } => UpscaleMode::Resolution,
        }
    }
}

/// One outbound upscale call: the validated file plus its parameters.
#[derive(Debug, Clone)]
pub struct UpscaleRequest {
    pub file: ValidFile,
    pub params: UpscaleParams,
}

#[async_trait]
pub trait UpscaleService: Send + Sync {
    /// Catalogue of supported integer factors, fetched once at startup.
    async fn scale_factors(&self) -> Result<Vec<u32>, SubmissionError>;

    /// Performs one upscale; resolves to a result or a failure, never hangs
    /// the lifecycle.
    async fn upscale(&self, request: UpscaleRequest) -> Result<SubmissionResult, SubmissionError>;
}

pub struct MissingUpscaleService;

#[async_trait]
impl UpscaleService for MissingUpscaleService {
    async fn scale_factors(&self) -> Result<Vec<u32>, SubmissionError> {
        Err(SubmissionError::NetworkFailure(
            "upscale service is unavailable".to_string(),
        ))
    }

    async fn upscale(&self, _request: UpscaleRequest) -> Result<SubmissionResult, SubmissionError> {
        Err(SubmissionError::NetworkFailure(
            "upscale service is unavailable".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Success,
    Error,
}

/// Events emitted towards the presentation layer. Every intent produces a
/// fresh snapshot; user-visible outcomes additionally produce a status line.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    SnapshotUpdated(WorkflowSnapshot),
    Status {
        severity: StatusSeverity,
        message: String,
    },
}

/// Immutable view of the workflow for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub phase: Phase,
    pub file_name: Option<String>,
    pub mode: UpscaleMode,
    pub scale_factor: Option<u32>,
    pub target_resolution: Option<(u32, u32)>,
    pub scale_factors: Vec<u32>,
    pub submit_enabled: bool,
    pub result: Option<SubmissionResult>,
}

struct WorkflowState {
    selection: Selection,
    phase: Phase,
    scale_factors: Option<Vec<u32>>,
    result: Option<SubmissionResult>,
}

/// The controller owning Selection, lifecycle and Result for one workflow
/// instance. All mutation goes through its intents; the only suspension
/// points are the two service calls.
pub struct UpscaleWorkflow {
    service: Arc<dyn UpscaleService>,
    inner: Mutex<WorkflowState>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl UpscaleWorkflow {
    pub fn new(service: Arc<dyn UpscaleService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            service,
            inner: Mutex::new(WorkflowState {
                selection: Selection::default(),
                phase: Phase::Idle,
                scale_factors: None,
                result: None,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let guard = self.inner.lock().await;
        Self::snapshot_of(&guard)
    }

    /// Fetches the factor catalogue once per session; a later call after a
    /// successful fetch is a no-op. Failure is non-fatal: factor mode stays
    /// unusable and a status message is surfaced.
    pub async fn load_scale_factors(&self) -> Result<(), SubmissionError> {
        {
            let guard = self.inner.lock().await;
            if guard.scale_factors.is_some() {
                return Ok(());
            }
        }
        match self.service.scale_factors().await {
            Ok(factors) => {
                let mut guard = self.inner.lock().await;
                info!(count = factors.len(), "loaded scale factor catalogue");
                guard.scale_factors = Some(factors);
                self.emit_snapshot(&guard);
                Ok(())
            }
            Err(err) => {
                warn!("failed to load scale factors: {err}");
                self.emit_status(
                    StatusSeverity::Error,
                    format!("Error loading scale factors: {err}"),
                );
                Err(err)
            }
        }
    }

    /// Validates the candidate and, on acceptance, starts a fresh workflow
    /// instance around it: parameters and any previous result are dropped.
    pub async fn select_file(&self, candidate: FileCandidate) -> Result<(), WorkflowError> {
        let mut guard = self.inner.lock().await;
        if guard.phase == Phase::Submitting {
            return Err(SelectionError::SubmissionInFlight.into());
        }
        let file = match validate::validate(candidate) {
            Ok(file) => file,
            Err(err) => {
                drop(guard);
                self.emit_status(StatusSeverity::Error, err.to_string());
                return Err(err.into());
            }
        };
        info!(
            file_name = file.file_name(),
            size_bytes = file.size_bytes(),
            "file selected"
        );
        guard.selection.select_file(file);
        guard.result = None;
        guard.phase = Phase::Configuring;
        self.emit_snapshot(&guard);
        Ok(())
    }

    pub async fn set_mode(&self, mode: UpscaleMode) -> Result<(), SelectionError> {
        let mut guard = self.lock_for_mutation().await?;
        guard.selection.set_mode(mode);
        self.emit_snapshot(&guard);
        Ok(())
    }

    pub async fn set_scale_factor(&self, factor: u32) -> Result<(), SelectionError> {
        let mut guard = self.lock_for_mutation().await?;
        let available = guard.scale_factors.clone();
        guard
            .selection
            .set_scale_factor(factor, available.as_deref())?;
        self.emit_snapshot(&guard);
        Ok(())
    }

    pub async fn set_target_resolution(
        &self,
        width: u32,
        height: u32,
    ) -> Result<(), SelectionError> {
        let mut guard = self.lock_for_mutation().await?;
        guard.selection.set_target_resolution(width, height)?;
        self.emit_snapshot(&guard);
        Ok(())
    }

    /// Drops the file while keeping the chosen mode.
    pub async fn remove_file(&self) -> Result<(), SelectionError> {
        let mut guard = self.lock_for_mutation().await?;
        guard.selection.remove_file();
        guard.result = None;
        guard.phase = Phase::Idle;
        self.emit_snapshot(&guard);
        Ok(())
    }

    /// Start over: selection, lifecycle and result are reset together.
    pub async fn reset(&self) -> Result<(), SelectionError> {
        let mut guard = self.lock_for_mutation().await?;
        guard.selection.clear();
        guard.result = None;
        guard.phase = Phase::Idle;
        self.emit_snapshot(&guard);
        Ok(())
    }

    /// Submits the captured selection exactly once. While the call is in
    /// flight the phase is `Submitting` and every mutation intent is
    /// rejected, so a second submission cannot start.
    pub async fn submit(&self) -> Result<SubmissionResult, SubmissionError> {
        let request = {
            let mut guard = self.inner.lock().await;
            if !submission_permitted(&guard.selection, guard.phase) {
                return Err(SubmissionError::NotReady);
            }
            let request = guard.selection.to_request().ok_or(SubmissionError::NotReady)?;
            guard.phase = Phase::Submitting;
            self.emit_snapshot(&guard);
            request
        };

        info!(
            mode = request.params.mode().as_str(),
            file_name = request.file.file_name(),
            "submitting upscale request"
        );
        self.emit_status(StatusSeverity::Info, progress_message(&request.params));

        let outcome = self.service.upscale(request).await;
        let mut guard = self.inner.lock().await;
        match outcome {
            Ok(result) => {
                info!(artifact = result.artifact_id.as_str(), "upscale succeeded");
                guard.phase = Phase::Succeeded;
                guard.result = Some(result.clone());
                self.emit_status(
                    StatusSeverity::Success,
                    format!(
                        "{} ({} → {})",
                        result.summary_message, result.original_size, result.upscaled_size
                    ),
                );
                self.emit_snapshot(&guard);
                Ok(result)
            }
            Err(err) => {
                warn!("upscale failed: {err}");
                guard.phase = Phase::Failed;
                self.emit_status(StatusSeverity::Error, format!("Error: {err}"));
                self.emit_snapshot(&guard);
                Err(err)
            }
        }
    }

    async fn lock_for_mutation(
        &self,
    ) -> Result<tokio::sync::MutexGuard<'_, WorkflowState>, SelectionError> {
        let guard = self.inner.lock().await;
        if guard.phase == Phase::Submitting {
            return Err(SelectionError::SubmissionInFlight);
        }
        Ok(guard)
    }

    fn snapshot_of(state: &WorkflowState) -> WorkflowSnapshot {
        WorkflowSnapshot {
            phase: state.phase,
            file_name: state
                .selection
                .file()
                .map(|file| file.file_name().to_string()),
            mode: state.selection.mode(),
            scale_factor: state.selection.scale_factor(),
            target_resolution: state.selection.target_resolution(),
            scale_factors: state.scale_factors.clone().unwrap_or_default(),
            submit_enabled: submission_permitted(&state.selection, state.phase),
            result: state.result.clone(),
        }
    }

    fn emit_snapshot(&self, state: &WorkflowState) {
        let _ = self
            .events
            .send(WorkflowEvent::SnapshotUpdated(Self::snapshot_of(state)));
    }

    fn emit_status(&self, severity: StatusSeverity, message: impl Into<String>) {
        let _ = self.events.send(WorkflowEvent::Status {
            severity,
            message: message.into(),
        });
    }
}

fn progress_message(params: &UpscaleParams) -> String {
    match params {
        UpscaleParams::Factor { scale_factor } => {
            format!("Upscaling your image {scale_factor}x... This may take a few moments.")
        }
        UpscaleParams::Resolution {
            target_width,
            target_height,
        } => {
            format!(
                "Upscaling your image to {target_width}×{target_height}... This may take a few moments."
            )
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
