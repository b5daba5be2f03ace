//! Error types for feature extraction, training and detection

use thiserror::Error;

/// Errors that can occur while extracting features, training or scoring
#[derive(Error, Debug)]
pub enum DetectorError {
    /// Address has no `@` or an empty local part
    #[error("Malformed email address: {0:?}")]
    MalformedAddress(String),

    /// The model was asked about a feature it never saw during training
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// The trainer could not estimate a model
    #[error("Training failed: {0}")]
    Training(String),

    /// A tuning parameter is out of range
    #[error("Invalid parameter {name}: {details}")]
    InvalidParameter { name: String, details: String },

    /// A persisted model could not be loaded
    #[error("Failed to load model {name}: {details}")]
    ModelLoad { name: String, details: String },

    /// An event was requested from a drained source
    #[error("Event source is exhausted")]
    Exhausted,

    /// Config or report (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying stream failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for detector operations
pub type Result<T> = std::result::Result<T, DetectorError>;
