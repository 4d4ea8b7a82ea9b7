//! Editing the cost profiles of a case's facility assets.

use crate::error::{AppError, AppResult};
use chrono::Utc;
use dcd_core::{AssetId, CaseId, ensure_finite_series, new_id};
use dcd_model::{AssetKind, Case, FacilityAsset, Profile, ProfileOverride, Series};
use dcd_store::{AssetLookup, AssetPersist, CaseLookup, CasePersist, Repository, StoreResult};

pub struct AssetService<'a> {
    pub cases: &'a dyn CaseLookup,
    pub assets: &'a dyn AssetLookup,
    pub asset_persist: &'a dyn AssetPersist,
    pub case_persist: &'a dyn CasePersist,
}

impl<'a> AssetService<'a> {
    pub fn from_repository<R: Repository>(repository: &'a R) -> Self {
        Self {
            cases: repository,
            assets: repository,
            asset_persist: repository,
            case_persist: repository,
        }
    }

    /// Create or replace the manual cost override of the case's `kind` asset.
    pub fn update_cost_profile_override(
        &self,
        case_id: CaseId,
        kind: AssetKind,
        series: Series,
        override_active: bool,
    ) -> AppResult<ProfileOverride> {
        ensure_finite_series(&series, "cost profile override")?;
        let (case, mut asset) = self.linked_asset(case_id, kind)?;

        let profiles = asset.profiles_mut();
        let updated = match profiles.cost_profile_override.take() {
            Some(existing) => ProfileOverride {
                series,
                override_active,
                ..existing
            },
            None => ProfileOverride::new(series, override_active),
        };
        profiles.cost_profile_override = Some(updated.clone());

        self.commit(case, asset)?;
        Ok(updated)
    }

    /// Set the computed cost profile of the case's `kind` asset, keeping its id
    /// when one already exists.
    pub fn add_or_update_cost_profile(
        &self,
        case_id: CaseId,
        kind: AssetKind,
        series: Series,
    ) -> AppResult<Profile> {
        ensure_finite_series(&series, "cost profile")?;
        let (case, mut asset) = self.linked_asset(case_id, kind)?;

        let profiles = asset.profiles_mut();
        let updated = match profiles.cost_profile.take() {
            Some(existing) => Profile { series, ..existing },
            None => Profile::new(series),
        };
        profiles.cost_profile = Some(updated.clone());

        self.commit(case, asset)?;
        Ok(updated)
    }

    /// Duplicate an asset under fresh ids and link the copy into `target_case_id`.
    pub fn copy_asset(
        &self,
        kind: AssetKind,
        asset_id: AssetId,
        target_case_id: CaseId,
    ) -> AppResult<FacilityAsset> {
        let source = self
            .assets
            .asset(kind, asset_id)?
            .ok_or(AppError::not_found(kind.label(), asset_id))?;
        let mut case = self
            .cases
            .case(target_case_id)?
            .ok_or(AppError::not_found("case", target_case_id))?;

        let mut copy = source;
        copy.set_id(new_id());
        let profiles = copy.profiles_mut();
        for profile in [&mut profiles.cost_profile, &mut profiles.cessation_cost_profile]
            .into_iter()
            .flatten()
        {
            profile.id = new_id();
        }
        if let Some(profile_override) = profiles.cost_profile_override.as_mut() {
            profile_override.id = new_id();
        }

        case.set_asset_link(kind, copy.id());
        let copy = self.commit(case, copy)?;
        tracing::info!(
            kind = kind.label(),
            source = %asset_id,
            copy = %copy.id(),
            case = %target_case_id,
            "copied asset"
        );
        Ok(copy)
    }

    fn linked_asset(&self, case_id: CaseId, kind: AssetKind) -> AppResult<(Case, FacilityAsset)> {
        let case = self
            .cases
            .case(case_id)?
            .ok_or(AppError::not_found("case", case_id))?;
        let asset_id = case.asset_link(kind);
        let asset = self
            .assets
            .asset(kind, asset_id)?
            .ok_or(AppError::not_found(kind.label(), asset_id))?;
        Ok((case, asset))
    }

    /// Store the asset, then bump the case's modify time.
    fn commit(&self, mut case: Case, mut asset: FacilityAsset) -> AppResult<FacilityAsset> {
        let now = Utc::now();
        asset.set_last_changed(now);
        logged(self.asset_persist.save_asset(&asset), "save asset")?;

        case.modify_time = now;
        logged(self.case_persist.save_case(&case), "save case")?;
        tracing::debug!(case = %case.id, asset = %asset.id(), "asset committed");
        Ok(asset)
    }
}

fn logged<T>(result: StoreResult<T>, operation: &str) -> AppResult<T> {
    result.map_err(|err| {
        tracing::error!(operation, error = %err, "storage failure");
        err.into()
    })
}
