//! Opening, creating and inspecting project documents.

use crate::error::AppResult;
use crate::settings::Settings;
use dcd_core::CaseId;
use dcd_model::{ProjectDocument, load_document};
use dcd_store::{CaseLookup, FileStore};
use std::path::Path;

/// Summary of a case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub id: CaseId,
    pub name: String,
    pub dg4_year: i32,
    pub has_co2_emissions: bool,
}

/// Open an existing document as a store.
pub fn open_store(path: &Path, settings: &Settings) -> AppResult<FileStore> {
    let store = FileStore::open(path, settings.pretty_json)?;
    tracing::debug!(path = %path.display(), "opened project document");
    Ok(store)
}

/// Write a new document with one base case.
pub fn create_project(
    path: &Path,
    name: &str,
    dg4_year: i32,
    settings: &Settings,
) -> AppResult<FileStore> {
    let document = ProjectDocument::starter(name, dg4_year);
    Ok(FileStore::create(path, &document, settings.pretty_json)?)
}

/// Parse and validate a document without opening it for writing.
pub fn validate_project(path: &Path) -> AppResult<ProjectDocument> {
    Ok(load_document(path)?)
}

pub fn list_cases(store: &FileStore) -> AppResult<Vec<CaseSummary>> {
    let document = store.document()?;
    let summaries = store
        .list_cases()?
        .into_iter()
        .map(|case| CaseSummary {
            has_co2_emissions: document
                .drainage_strategy(case.drainage_strategy_link)
                .is_some_and(|d| d.co2_emissions.is_some()),
            id: case.id,
            name: case.name,
            dg4_year: case.dg4_year,
        })
        .collect();
    Ok(summaries)
}
