use thiserror::Error;

use crate::ports::{ConfigStoreError, DirectoryError};

/// Errors surfaced by the tour and settings use cases.
///
/// Validation and not-found are caller mistakes; the rest are internal
/// failures. Telemetry failures never reach this type.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("{0}")]
    Validation(String),

    #[error("step not found: {id}")]
    StepNotFound { id: String },

    #[error("stored steps for language '{language}' are corrupt: {reason}")]
    CorruptRecord { language: String, reason: String },

    #[error(transparent)]
    Storage(#[from] ConfigStoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl TourError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn corrupt(language: &str, reason: impl ToString) -> Self {
        Self::CorruptRecord {
            language: language.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type TourResult<T> = Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_message_is_transparent() {
        let err: TourError = ConfigStoreError::Write("disk full".to_string()).into();
        assert_eq!(err.to_string(), "config store write failed: disk full");
    }

    #[test]
    fn corrupt_record_names_the_language() {
        let err = TourError::corrupt("nl", "expected a JSON array");
        assert!(err.to_string().contains("'nl'"));
    }
}
