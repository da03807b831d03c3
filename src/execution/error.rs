//! Machine Errors
//!
//! Two failure kinds exist: a step action returning an error during a run,
//! and an unknown step id handed to the checkpoint/resume operations. Both
//! surface explicitly; neither is ever swallowed.

use thiserror::Error;

use crate::chain::step::StepError;

/// Errors produced by [`Machine`](crate::Machine) operations.
#[derive(Debug, Error)]
pub enum MachineError {
    /// No step with this id exists in the chain.
    ///
    /// Returned by `set_step`, `resume` and `restore`; the cursor is left
    /// unchanged.
    #[error("step '{0}' not found")]
    StepNotFound(String),

    /// A step's action returned an error and the run halted there.
    ///
    /// `error` is the exact instance the action returned, reachable both
    /// through the field and through `source()`.
    #[error("step '{step_id}' failed: {error}")]
    StepFailed {
        step_id: String,
        #[source]
        error: StepError,
    },
}

impl MachineError {
    /// Id of the step this error refers to.
    pub fn step_id(&self) -> &str {
        match self {
            Self::StepNotFound(id) => id,
            Self::StepFailed { step_id, .. } => step_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_step_not_found_display() {
        let err = MachineError::StepNotFound("missing".to_string());
        assert_eq!(err.to_string(), "step 'missing' not found");
        assert_eq!(err.step_id(), "missing");
    }

    #[test]
    fn test_step_failed_display_and_source() {
        let inner: StepError = "disk full".into();
        let err = MachineError::StepFailed {
            step_id: "persist".to_string(),
            error: inner,
        };

        assert_eq!(err.to_string(), "step 'persist' failed: disk full");
        assert_eq!(err.step_id(), "persist");
        assert!(err.source().is_some());
    }
}
