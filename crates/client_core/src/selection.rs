//! Selection state and the derived submit availability.
//!
//! Exactly one of the two parameter branches may be populated at a time;
//! switching the mode clears the other branch, never the file.

use shared::domain::UpscaleMode;

use crate::{
    error::SelectionError,
    validate::ValidFile,
    Phase, UpscaleParams, UpscaleRequest,
};

/// Largest accepted target dimension, matching the service-side bound.
pub const MAX_TARGET_DIMENSION: u32 = 20_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    file: Option<ValidFile>,
    mode: UpscaleMode,
    scale_factor: Option<u32>,
    target_resolution: Option<(u32, u32)>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            file: None,
            mode: UpscaleMode::Factor,
            scale_factor: None,
            target_resolution: None,
        }
    }
}

impl Selection {
    pub fn file(&self) -> Option<&ValidFile> {
        self.file.as_ref()
    }

    pub fn mode(&self) -> UpscaleMode {
        self.mode
    }

    pub fn scale_factor(&self) -> Option<u32> {
        self.scale_factor
    }

    pub fn target_resolution(&self) -> Option<(u32, u32)> {
        self.target_resolution
    }

    /// Installs a validated file and drops the parameters of both branches.
    pub fn select_file(&mut self, file: ValidFile) {
        self.file = Some(file);
        self.scale_factor = None;
        self.target_resolution = None;
    }

    /// Switches the active branch, unconditionally clearing the other one.
    pub fn set_mode(&mut self, mode: UpscaleMode) {
        self.mode = mode;
        match mode {
            UpscaleMode::Factor => self.target_resolution = None,
            UpscaleMode::Resolution => self.scale_factor = None,
        }
    }

    /// Accepts only members of the fetched factor catalogue.
    pub fn set_scale_factor(
        &mut self,
        factor: u32,
        available: Option<&[u32]>,
    ) -> Result<(), SelectionError> {
        if self.mode != UpscaleMode::Factor {
            return Err(SelectionError::WrongMode {
                required: UpscaleMode::Factor,
            });
        }
        let available = available.ok_or(SelectionError::FactorsUnavailable)?;
        if !available.contains(&factor) {
            return Err(SelectionError::UnsupportedFactor(factor));
        }
        self.scale_factor = Some(factor);
        Ok(())
    }

    /// All-or-nothing per edit: a zero or out-of-range dimension leaves the
    /// pair unset rather than storing a partial value.
    pub fn set_target_resolution(&mut self, width: u32, height: u32) -> Result<(), SelectionError> {
        if self.mode != UpscaleMode::Resolution {
            return Err(SelectionError::WrongMode {
                required: UpscaleMode::Resolution,
            });
        }
        let in_range = |dim: u32| dim > 0 && dim <= MAX_TARGET_DIMENSION;
        self.target_resolution = if in_range(width) && in_range(height) {
            Some((width, height))
        } else {
            None
        };
        Ok(())
    }

    /// Drops the file and both parameter branches; the mode is kept.
    pub fn remove_file(&mut self) {
        self.file = None;
        self.scale_factor = None;
        self.target_resolution = None;
    }

    /// Back to the initial empty state.
    pub fn clear(&mut self) {
        *self = Selection::default();
    }

    pub fn parameters_complete(&self) -> bool {
        match self.mode {
            UpscaleMode::Factor => self.scale_factor.is_some(),
            UpscaleMode::Resolution => self.target_resolution.is_some(),
        }
    }

    /// Captures the outbound request, or `None` while the selection is
    /// incomplete. Cloned eagerly so later edits cannot race the wire.
    pub fn to_request(&self) -> Option<UpscaleRequest> {
        let file = self.file.clone()?;
        let params = match self.mode {
            UpscaleMode::Factor => UpscaleParams::Factor {
                scale_factor: self.scale_factor?,
            },
            UpscaleMode::Resolution => {
                let (target_width, target_height) = self.target_resolution?;
                UpscaleParams::Resolution {
                    target_width,
                    target_height,
                }
            }
        };
        Some(UpscaleRequest { file, params })
    }
}

/// Pure availability decision: a submission is permitted iff a file is set,
/// the lifecycle allows configuring (a failed attempt may be retried), and
/// the mode-appropriate parameters are fully present.
pub fn submission_permitted(selection: &Selection, phase: Phase) -> bool {
    matches!(phase, Phase::Configuring | Phase::Failed)
        && selection.file().is_some()
        && selection.parameters_complete()
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
