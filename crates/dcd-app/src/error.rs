//! Error types for the dcd-app service layer.

use dcd_core::Id;
use std::path::PathBuf;

/// Application error type shared by the services and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Id },

    #[error(transparent)]
    Storage(#[from] dcd_store::StoreError),

    #[error("Document error: {0}")]
    Model(#[from] dcd_model::ModelError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] dcd_core::CoreError),

    #[error("Failed to read settings file: {path}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

/// Result type for dcd-app operations.
pub type AppResult<T> = Result<T, AppError>;
