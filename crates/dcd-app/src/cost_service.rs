//! Effective cost profiles and per-case cost aggregation.

use crate::error::{AppError, AppResult};
use dcd_core::{CaseId, merge_all, year_span};
use dcd_model::{
    AssetKind, DrainageStrategy, Exploration, Profile, ProfileOverride, Series, WellProject,
};
use dcd_store::{AssetLookup, CaseLookup, ExplorationLookup, Repository, WellProjectLookup};
use serde::Serialize;

/// The active override series if there is one, else the computed profile.
pub fn effective_profile(
    profile: Option<&Profile>,
    profile_override: Option<&ProfileOverride>,
) -> Option<Series> {
    match profile_override {
        Some(o) if o.override_active => Some(o.series.clone()),
        _ => profile.map(|p| p.series.clone()),
    }
}

/// CO2 emissions as reported for the strategy, honoring an active override.
pub fn effective_co2_emissions(drainage_strategy: &DrainageStrategy) -> Option<Series> {
    effective_profile(
        drainage_strategy.co2_emissions.as_ref(),
        drainage_strategy.co2_emissions_override.as_ref(),
    )
}

/// One labelled cost profile, years relative to DG4.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    pub label: &'static str,
    pub series: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseCostSummary {
    pub case_id: CaseId,
    pub dg4_year: i32,
    pub capex: Vec<CostLine>,
    pub exploration: Vec<CostLine>,
    pub capex_total: Series,
    pub exploration_total: Series,
}

impl CaseCostSummary {
    /// Inclusive calendar-year range covered by either total.
    pub fn calendar_span(&self) -> Option<(i32, i32)> {
        year_span([Some(&self.capex_total), Some(&self.exploration_total)])
            .map(|(first, last)| (first + self.dg4_year, last + self.dg4_year))
    }

    pub fn grand_total(&self) -> f64 {
        self.capex_total.total() + self.exploration_total.total()
    }
}

pub struct CostService<'a> {
    pub cases: &'a dyn CaseLookup,
    pub assets: &'a dyn AssetLookup,
    pub explorations: &'a dyn ExplorationLookup,
    pub well_projects: &'a dyn WellProjectLookup,
}

impl<'a> CostService<'a> {
    pub fn from_repository<R: Repository>(repository: &'a R) -> Self {
        Self {
            cases: repository,
            assets: repository,
            explorations: repository,
            well_projects: repository,
        }
    }

    pub fn case_cost_summary(&self, case_id: CaseId) -> AppResult<CaseCostSummary> {
        let case = self
            .cases
            .case(case_id)?
            .ok_or(AppError::not_found("case", case_id))?;

        let mut capex = Vec::new();
        for kind in AssetKind::ALL {
            let id = case.asset_link(kind);
            let asset = self
                .assets
                .asset(kind, id)?
                .ok_or(AppError::not_found(kind.label(), id))?;
            let profiles = asset.profiles();
            if let Some(series) = effective_profile(
                profiles.cost_profile.as_ref(),
                profiles.cost_profile_override.as_ref(),
            ) {
                capex.push(CostLine {
                    label: kind.label(),
                    series,
                });
            }
        }

        let well_project = self
            .well_projects
            .well_project(case.well_project_link)?
            .ok_or(AppError::not_found("well project", case.well_project_link))?;
        capex.extend(well_cost_lines(&well_project));

        let exploration = self
            .explorations
            .exploration(case.exploration_link)?
            .ok_or(AppError::not_found("exploration", case.exploration_link))?;
        let exploration = exploration_cost_lines(&exploration);

        let capex_total = merge_all(capex.iter().map(|l| &l.series));
        let exploration_total = merge_all(exploration.iter().map(|l| &l.series));
        tracing::debug!(
            case = %case_id,
            lines = capex.len() + exploration.len(),
            "aggregated case costs"
        );

        Ok(CaseCostSummary {
            case_id,
            dg4_year: case.dg4_year,
            capex,
            exploration,
            capex_total,
            exploration_total,
        })
    }
}

fn cost_lines<'p>(
    profiles: impl IntoIterator<Item = (&'static str, Option<&'p Profile>)>,
) -> Vec<CostLine> {
    profiles
        .into_iter()
        .filter_map(|(label, profile)| {
            profile.map(|p| CostLine {
                label,
                series: p.series.clone(),
            })
        })
        .collect()
}

fn well_cost_lines(well_project: &WellProject) -> Vec<CostLine> {
    cost_lines([
        ("oil producers", well_project.oil_producer_cost_profile.as_ref()),
        ("gas producers", well_project.gas_producer_cost_profile.as_ref()),
        ("water injectors", well_project.water_injector_cost_profile.as_ref()),
        ("gas injectors", well_project.gas_injector_cost_profile.as_ref()),
    ])
}

fn exploration_cost_lines(exploration: &Exploration) -> Vec<CostLine> {
    cost_lines([
        ("exploration wells", exploration.exploration_well_cost_profile.as_ref()),
        ("appraisal wells", exploration.appraisal_well_cost_profile.as_ref()),
        ("sidetracks", exploration.sidetrack_cost_profile.as_ref()),
        ("seismic", exploration.seismic_acquisition_and_processing.as_ref()),
        ("country office", exploration.country_office_cost.as_ref()),
        ("g&g admin", exploration.g_and_g_admin_cost.as_ref()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcd_core::TimeSeries;
    use dcd_model::ProjectDocument;
    use dcd_store::MemoryStore;

    fn profile(start_year: i32, values: Vec<f64>) -> Profile {
        Profile::new(TimeSeries::new(start_year, values))
    }

    #[test]
    fn override_wins_only_when_active() {
        let computed = profile(0, vec![1.0]);
        let mut manual = ProfileOverride::new(TimeSeries::new(0, vec![9.0]), false);

        assert_eq!(
            effective_profile(Some(&computed), Some(&manual)),
            Some(TimeSeries::new(0, vec![1.0]))
        );
        manual.override_active = true;
        assert_eq!(
            effective_profile(Some(&computed), Some(&manual)),
            Some(TimeSeries::new(0, vec![9.0]))
        );
        assert_eq!(effective_profile(None, None), None);
    }

    #[test]
    fn summary_of_empty_case_has_no_lines() {
        let doc = ProjectDocument::starter("Field", 2030);
        let case_id = doc.cases[0].id;
        let store = MemoryStore::new(doc);

        let summary = CostService::from_repository(&store)
            .case_cost_summary(case_id)
            .unwrap();
        assert!(summary.capex.is_empty());
        assert!(summary.exploration.is_empty());
        assert_eq!(summary.calendar_span(), None);
        assert_eq!(summary.grand_total(), 0.0);
    }

    #[test]
    fn summary_merges_capex_and_exploration() {
        let mut doc = ProjectDocument::starter("Field", 2030);
        doc.topsides[0].profiles.cost_profile = Some(profile(-3, vec![10.0, 20.0]));
        doc.surfs[0].profiles.cost_profile = Some(profile(-2, vec![5.0]));
        doc.surfs[0].profiles.cost_profile_override =
            Some(ProfileOverride::new(TimeSeries::new(-2, vec![7.0, 7.0]), true));
        doc.well_projects[0].oil_producer_cost_profile = Some(profile(0, vec![1.0]));
        doc.explorations[0].seismic_acquisition_and_processing = Some(profile(-6, vec![2.0]));
        let case_id = doc.cases[0].id;
        let store = MemoryStore::new(doc);

        let summary = CostService::from_repository(&store)
            .case_cost_summary(case_id)
            .unwrap();

        let labels: Vec<_> = summary.capex.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["topside", "surf", "oil producers"]);
        assert_eq!(
            summary.capex_total,
            TimeSeries::new(-3, vec![10.0, 27.0, 7.0, 1.0])
        );
        assert_eq!(summary.exploration_total, TimeSeries::new(-6, vec![2.0]));
        assert_eq!(summary.calendar_span(), Some((2024, 2030)));
        assert_eq!(summary.grand_total(), 47.0);
    }

    #[test]
    fn summary_of_unknown_case_is_not_found() {
        let store = MemoryStore::new(ProjectDocument::starter("Field", 2030));
        let err = CostService::from_repository(&store)
            .case_cost_summary(dcd_core::new_id())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn co2_override_is_reported() {
        let doc = ProjectDocument::starter("Field", 2030);
        let strategy = doc.drainage_strategies[0]
            .with_co2_emissions(TimeSeries::new(1, vec![3.0]));
        assert_eq!(
            effective_co2_emissions(&strategy),
            Some(TimeSeries::new(1, vec![3.0]))
        );

        let overridden = DrainageStrategy {
            co2_emissions_override: Some(ProfileOverride::new(TimeSeries::new(1, vec![4.0]), true)),
            ..strategy
        };
        assert_eq!(
            effective_co2_emissions(&overridden),
            Some(TimeSeries::new(1, vec![4.0]))
        );
    }
}
