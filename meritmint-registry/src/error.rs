use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("token already exists: {token_id}")]
    Conflict { token_id: String },

    #[error("a mint is already in flight")]
    Busy,

    #[error("token not found: {token_id}")]
    NotFound { token_id: String },

    #[error("storage unavailable: {reason}")]
    StorageUnavailable { reason: String },
}

impl RegistryError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind string, used by CLI output and exit-code
    /// mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Conflict { .. } => "conflict",
            Self::Busy => "busy",
            Self::NotFound { .. } => "not_found",
            Self::StorageUnavailable { .. } => "storage_unavailable",
        }
    }
}
