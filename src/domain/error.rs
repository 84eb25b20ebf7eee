use serde::Serialize;
use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Capacity exceeded: {message}")]
    Capacity { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn capacity(message: impl Into<String>) -> Self {
        Self::Capacity {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The bare message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Capacity { message }
            | Self::Forbidden { message }
            | Self::Storage { message }
            | Self::Configuration { message } => message,
        }
    }

    /// Stable snake_case tag for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found_error",
            Self::Conflict { .. } => "conflict_error",
            Self::Capacity { .. } => "capacity_error",
            Self::Forbidden { .. } => "forbidden_error",
            Self::Storage { .. } => "storage_error",
            Self::Configuration { .. } => "configuration_error",
        }
    }
}

/// One entry of an [`ErrorReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub kind: String,
    pub message: String,
}

/// Serializable, ordered, non-empty list of errors handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    errors: Vec<ErrorEntry>,
}

impl ErrorReport {
    /// The error that stopped the operation
    pub fn first(&self) -> &ErrorEntry {
        // never empty: only constructed from a DomainError
        &self.errors[0]
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.errors
    }
}

impl From<&DomainError> for ErrorReport {
    fn from(error: &DomainError) -> Self {
        Self {
            errors: vec![ErrorEntry {
                kind: error.kind().to_string(),
                message: error.message().to_string(),
            }],
        }
    }
}

impl From<DomainError> for ErrorReport {
    fn from(error: DomainError) -> Self {
        Self::from(&error)
    }
}
