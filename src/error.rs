//! Error types for device-advisor operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Message returned to callers when the device age is missing or negative.
pub const INVALID_DEVICE_AGE_MESSAGE: &str = "Edad del dispositivo no válida.";

/// Main error type for device-advisor operations.
///
/// # Examples
///
/// ```
/// use device_advisor::error::AdvisorError;
///
/// let err = AdvisorError::DimensionMismatch {
///     expected: "4 features".to_string(),
///     actual: "3 features".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Matrix/sample dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Fitting was attempted with no samples.
    #[error("Cannot fit with zero samples")]
    EmptyDataset,

    /// A train/test split would leave one side empty.
    #[error("Split would result in empty train or test set (n_train={n_train}, n_test={n_test})")]
    EmptyPartition {
        /// Rows assigned to training
        n_train: usize,
        /// Rows assigned to testing
        n_test: usize,
    },

    /// Prediction requested before `fit`.
    #[error("Model not fitted yet. Call fit() first.")]
    NotFitted,

    /// The tree produced a class index with no matching label.
    #[error("Unknown class index {index} (model knows {n_classes} classes)")]
    UnknownClass {
        /// Offending class index
        index: usize,
        /// Number of known classes
        n_classes: usize,
    },

    /// Device age is missing or negative.
    #[error("{}", INVALID_DEVICE_AGE_MESSAGE)]
    InvalidDeviceAge(i64),

    /// Request body could not be decoded into a device profile.
    #[error("{0}")]
    MalformedRequest(String),
}

impl AdvisorError {
    /// True for errors caused by the caller's input rather than the model.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDeviceAge(_))
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}

/// Convenience type alias for Results with [`AdvisorError`].
pub type Result<T> = std::result::Result<T, AdvisorError>;
