//! dcd-store: entity lookup and persistence over a project document.

pub mod backend;
pub mod repository;

pub use backend::{
    DocumentBackend, DocumentStore, FileBackend, FileStore, MemoryBackend, MemoryStore,
};
pub use repository::*;

use dcd_core::Id;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] dcd_model::ModelError),

    #[error("Update conflict: {entity} {id} no longer exists")]
    Conflict { entity: &'static str, id: Id },

    #[error("Invalid store path: {message}")]
    InvalidPath { message: String },

    #[error("Document already exists: {}", path.display())]
    AlreadyExists { path: std::path::PathBuf },
}

impl StoreError {
    /// Whether the write lost a race with a concurrent delete.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}
