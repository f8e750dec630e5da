use thiserror::Error;

/// Failure of an optional platform capability (audio, clipboard, speech).
///
/// None of these are fatal; the app reports them as notifications.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("{0} is not supported on this system")]
    Unsupported(&'static str),

    #[error("{capability} failed: {reason}")]
    Failed {
        capability: &'static str,
        reason: String,
    },
}

impl CapabilityError {
    pub fn failed(capability: &'static str, reason: impl ToString) -> Self {
        CapabilityError::Failed {
            capability,
            reason: reason.to_string(),
        }
    }
}
