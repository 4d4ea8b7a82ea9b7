//! Document backends and the store built on top of them.

use crate::repository::*;
use crate::{StoreError, StoreResult};
use dcd_core::{AssetId, CaseId, ProjectId};
use dcd_model::{
    AssetKind, Case, DocumentFormat, DrainageStrategy, Exploration, FacilityAsset, Project,
    ProjectDocument, Topside, WellProject, WellProjectWell, parse_document, render_document,
    validate_document,
};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a project document lives.
pub trait DocumentBackend {
    fn load(&self) -> StoreResult<ProjectDocument>;
    fn store(&self, document: &ProjectDocument) -> StoreResult<()>;
}

/// Process-local document, used by tests and one-shot tools.
#[derive(Debug)]
pub struct MemoryBackend {
    document: RefCell<ProjectDocument>,
    writes: Cell<usize>,
}

impl DocumentBackend for MemoryBackend {
    fn load(&self) -> StoreResult<ProjectDocument> {
        Ok(self.document.borrow().clone())
    }

    fn store(&self, document: &ProjectDocument) -> StoreResult<()> {
        *self.document.borrow_mut() = document.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Document kept in a YAML or JSON file.
///
/// Every load re-reads the file; every store replaces it through a temporary
/// file and a rename, so readers never see a partial write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    format: DocumentFormat,
    pretty: bool,
}

impl FileBackend {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> StoreResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StoreError::InvalidPath {
                message: format!("{} has no file name", self.path.display()),
            })?;
        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".tmp");
        Ok(self.path.with_file_name(temp_name))
    }
}

impl DocumentBackend for FileBackend {
    fn load(&self) -> StoreResult<ProjectDocument> {
        let content = fs::read_to_string(&self.path)?;
        Ok(parse_document(&content, self.format)?)
    }

    fn store(&self, document: &ProjectDocument) -> StoreResult<()> {
        let content = render_document(document, self.format, self.pretty)?;
        let temp_path = self.temp_path()?;
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// Lookup and persist capabilities over any [`DocumentBackend`].
#[derive(Debug)]
pub struct DocumentStore<B> {
    backend: B,
}

pub type MemoryStore = DocumentStore<MemoryBackend>;
pub type FileStore = DocumentStore<FileBackend>;

impl MemoryStore {
    pub fn new(document: ProjectDocument) -> Self {
        Self {
            backend: MemoryBackend {
                document: RefCell::new(document),
                writes: Cell::new(0),
            },
        }
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> ProjectDocument {
        self.backend.document.borrow().clone()
    }

    /// Number of committed writes so far.
    pub fn write_count(&self) -> usize {
        self.backend.writes.get()
    }
}

impl FileStore {
    /// Open an existing document file.
    pub fn open(path: &Path, pretty: bool) -> StoreResult<Self> {
        let format = DocumentFormat::from_path(path)?;
        if !path.is_file() {
            return Err(StoreError::InvalidPath {
                message: format!("{} is not a file", path.display()),
            });
        }
        Ok(Self {
            backend: FileBackend {
                path: path.to_path_buf(),
                format,
                pretty,
            },
        })
    }

    /// Write `document` to a new file and open it. An existing file is left
    /// untouched.
    pub fn create(path: &Path, document: &ProjectDocument, pretty: bool) -> StoreResult<Self> {
        if path.exists() {
            return Err(StoreError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let backend = FileBackend {
            path: path.to_path_buf(),
            format: DocumentFormat::from_path(path)?,
            pretty,
        };
        backend.store(document)?;
        tracing::info!(path = %path.display(), "created project document");
        Ok(Self { backend })
    }

    pub fn path(&self) -> &Path {
        self.backend.path()
    }
}

impl<B: DocumentBackend> DocumentStore<B> {
    pub fn document(&self) -> StoreResult<ProjectDocument> {
        self.backend.load()
    }

    /// Read-modify-write of the whole document; `apply` runs on a fresh copy.
    fn update(
        &self,
        apply: impl FnOnce(&mut ProjectDocument) -> StoreResult<()>,
    ) -> StoreResult<()> {
        let mut document = self.backend.load()?;
        apply(&mut document)?;
        validate_document(&document).map_err(dcd_model::ModelError::from)?;
        self.backend.store(&document)
    }
}

impl<B: DocumentBackend> CaseLookup for DocumentStore<B> {
    fn case(&self, id: CaseId) -> StoreResult<Option<Case>> {
        Ok(self.backend.load()?.case(id).cloned())
    }

    fn list_cases(&self) -> StoreResult<Vec<Case>> {
        Ok(self.backend.load()?.cases)
    }
}

impl<B: DocumentBackend> TopsideLookup for DocumentStore<B> {
    fn topside(&self, id: AssetId) -> StoreResult<Option<Topside>> {
        Ok(self.backend.load()?.topside(id).cloned())
    }
}

impl<B: DocumentBackend> ProjectLookup for DocumentStore<B> {
    fn project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let document = self.backend.load()?;
        Ok((document.project.id == id).then_some(document.project))
    }
}

impl<B: DocumentBackend> DrainageStrategyLookup for DocumentStore<B> {
    fn drainage_strategy(&self, id: AssetId) -> StoreResult<Option<DrainageStrategy>> {
        Ok(self.backend.load()?.drainage_strategy(id).cloned())
    }
}

impl<B: DocumentBackend> WellProjectLookup for DocumentStore<B> {
    fn well_project(&self, id: AssetId) -> StoreResult<Option<WellProject>> {
        Ok(self.backend.load()?.well_project(id).cloned())
    }
}

impl<B: DocumentBackend> LinkedWellsLookup for DocumentStore<B> {
    fn linked_wells(&self, well_project_id: AssetId) -> StoreResult<Vec<WellProjectWell>> {
        Ok(self
            .backend
            .load()?
            .well_project(well_project_id)
            .map(|wp| wp.wells.clone())
            .unwrap_or_default())
    }
}

impl<B: DocumentBackend> ExplorationLookup for DocumentStore<B> {
    fn exploration(&self, id: AssetId) -> StoreResult<Option<Exploration>> {
        Ok(self.backend.load()?.exploration(id).cloned())
    }
}

impl<B: DocumentBackend> AssetLookup for DocumentStore<B> {
    fn asset(&self, kind: AssetKind, id: AssetId) -> StoreResult<Option<FacilityAsset>> {
        Ok(self.backend.load()?.asset(kind, id))
    }
}

impl<B: DocumentBackend> DrainageStrategyPersist for DocumentStore<B> {
    fn save_drainage_strategy(&self, strategy: &DrainageStrategy) -> StoreResult<()> {
        self.update(|document| {
            let slot = document
                .drainage_strategies
                .iter_mut()
                .find(|d| d.id == strategy.id)
                .ok_or(StoreError::Conflict {
                    entity: "drainage strategy",
                    id: strategy.id,
                })?;
            *slot = strategy.clone();
            Ok(())
        })?;
        tracing::debug!(id = %strategy.id, "saved drainage strategy");
        Ok(())
    }
}

impl<B: DocumentBackend> AssetPersist for DocumentStore<B> {
    fn save_asset(&self, asset: &FacilityAsset) -> StoreResult<()> {
        self.update(|document| {
            document.upsert_asset(asset.clone());
            Ok(())
        })?;
        tracing::debug!(kind = asset.kind().label(), id = %asset.id(), "saved asset");
        Ok(())
    }
}

impl<B: DocumentBackend> CasePersist for DocumentStore<B> {
    fn save_case(&self, case: &Case) -> StoreResult<()> {
        self.update(|document| {
            let slot = document
                .cases
                .iter_mut()
                .find(|c| c.id == case.id)
                .ok_or(StoreError::Conflict {
                    entity: "case",
                    id: case.id,
                })?;
            *slot = case.clone();
            Ok(())
        })?;
        tracing::debug!(id = %case.id, "saved case");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcd_core::{TimeSeries, new_id};

    #[test]
    fn memory_store_counts_writes() {
        let store = MemoryStore::new(ProjectDocument::starter("Field", 2030));
        let mut strategy = store.snapshot().drainage_strategies[0].clone();
        strategy.description = "updated".to_string();

        store.save_drainage_strategy(&strategy).unwrap();

        assert_eq!(store.write_count(), 1);
        assert_eq!(
            store.snapshot().drainage_strategies[0].description,
            "updated"
        );
    }

    #[test]
    fn saving_unknown_strategy_is_conflict() {
        let store = MemoryStore::new(ProjectDocument::starter("Field", 2030));
        let mut strategy = store.snapshot().drainage_strategies[0].clone();
        strategy.id = new_id();

        let err = store.save_drainage_strategy(&strategy).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn invalid_update_is_not_committed() {
        let store = MemoryStore::new(ProjectDocument::starter("Field", 2030));
        let mut strategy = store.snapshot().drainage_strategies[0].clone();
        strategy.co2_emissions = Some(dcd_model::Profile::new(TimeSeries::new(0, vec![f64::NAN])));

        assert!(matches!(
            store.save_drainage_strategy(&strategy),
            Err(StoreError::Document(_))
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn linked_wells_of_unknown_project_is_empty() {
        let store = MemoryStore::new(ProjectDocument::starter("Field", 2030));
        assert!(store.linked_wells(new_id()).unwrap().is_empty());
    }

    #[test]
    fn project_lookup_matches_id() {
        let doc = ProjectDocument::starter("Field", 2030);
        let project_id = doc.project.id;
        let store = MemoryStore::new(doc);
        assert!(store.project(project_id).unwrap().is_some());
        assert!(store.project(new_id()).unwrap().is_none());
    }
}
