//! Capability traits consumed by the service layer.
//!
//! Lookups return `Ok(None)` for a missing entity; turning that into a
//! not-found error is the caller's decision.

use crate::StoreResult;
use dcd_core::{AssetId, CaseId, ProjectId};
use dcd_model::{
    AssetKind, Case, DrainageStrategy, Exploration, FacilityAsset, Project, Topside, WellProject,
    WellProjectWell,
};

pub trait CaseLookup {
    fn case(&self, id: CaseId) -> StoreResult<Option<Case>>;
    fn list_cases(&self) -> StoreResult<Vec<Case>>;
}

pub trait TopsideLookup {
    fn topside(&self, id: AssetId) -> StoreResult<Option<Topside>>;
}

pub trait ProjectLookup {
    fn project(&self, id: ProjectId) -> StoreResult<Option<Project>>;
}

pub trait DrainageStrategyLookup {
    fn drainage_strategy(&self, id: AssetId) -> StoreResult<Option<DrainageStrategy>>;
}

pub trait WellProjectLookup {
    fn well_project(&self, id: AssetId) -> StoreResult<Option<WellProject>>;
}

pub trait LinkedWellsLookup {
    /// Wells linked to the well project; empty when there are none.
    fn linked_wells(&self, well_project_id: AssetId) -> StoreResult<Vec<WellProjectWell>>;
}

pub trait ExplorationLookup {
    fn exploration(&self, id: AssetId) -> StoreResult<Option<Exploration>>;
}

pub trait AssetLookup {
    fn asset(&self, kind: AssetKind, id: AssetId) -> StoreResult<Option<FacilityAsset>>;
}

pub trait DrainageStrategyPersist {
    /// Replace the stored strategy with the same id in one write.
    fn save_drainage_strategy(&self, strategy: &DrainageStrategy) -> StoreResult<()>;
}

pub trait AssetPersist {
    /// Insert or replace a facility asset.
    fn save_asset(&self, asset: &FacilityAsset) -> StoreResult<()>;
}

pub trait CasePersist {
    fn save_case(&self, case: &Case) -> StoreResult<()>;
}

/// Every capability at once, for stores that provide them all.
pub trait Repository:
    CaseLookup
    + TopsideLookup
    + ProjectLookup
    + DrainageStrategyLookup
    + WellProjectLookup
    + LinkedWellsLookup
    + ExplorationLookup
    + AssetLookup
    + DrainageStrategyPersist
    + AssetPersist
    + CasePersist
{
}

impl<T> Repository for T where
    T: CaseLookup
        + TopsideLookup
        + ProjectLookup
        + DrainageStrategyLookup
        + WellProjectLookup
        + LinkedWellsLookup
        + ExplorationLookup
        + AssetLookup
        + DrainageStrategyPersist
        + AssetPersist
        + CasePersist
{
}
