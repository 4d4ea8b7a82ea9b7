//! dcd-model: entity schema, the project document format and its validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_document};

use std::path::Path;

/// Document version written by this crate.
pub const DOCUMENT_VERSION: u32 = 1;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a [`ProjectDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            _ => Err(ModelError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn parse_document(content: &str, format: DocumentFormat) -> ModelResult<ProjectDocument> {
    let document: ProjectDocument = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };
    validate_document(&document)?;
    Ok(document)
}

pub fn render_document(
    document: &ProjectDocument,
    format: DocumentFormat,
    pretty: bool,
) -> ModelResult<String> {
    validate_document(document)?;
    let content = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(document)?,
        DocumentFormat::Json if pretty => serde_json::to_string_pretty(document)?,
        DocumentFormat::Json => serde_json::to_string(document)?,
    };
    Ok(content)
}

pub fn load_document(path: &Path) -> ModelResult<ProjectDocument> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, format)
}
