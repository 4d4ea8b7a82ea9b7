//! CO2 emissions profile generation for a case.

use crate::emission_helper::{
    calculate_flaring, calculate_losses, calculate_total_fuel_consumptions, flaring_emissions,
    fuel_emissions, losses_emissions,
};
use crate::error::{AppError, AppResult};
use dcd_core::units::kg_to_tonnes;
use dcd_core::{CaseId, ProfileId, TimeSeries, merge, merge_all};
use dcd_model::{Project, Series, WellProject};
use dcd_store::{
    CaseLookup, DrainageStrategyLookup, DrainageStrategyPersist, LinkedWellsLookup,
    ProjectLookup, Repository, TopsideLookup, WellProjectLookup,
};
use serde::Serialize;

/// Generated emissions as returned to callers, in tonnes CO2 per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Co2EmissionsDto {
    pub id: ProfileId,
    pub start_year: i32,
    pub values: Vec<f64>,
}

/// Emissions from drilling the wells linked to `well_project`, in tonnes.
///
/// Every drilling schedule is summed into a wells-per-year profile which is
/// then scaled by rig days per well and daily rig emissions.
pub fn calculate_drilling_emissions(
    project: &Project,
    well_project: &WellProject,
    linked_wells: &dyn LinkedWellsLookup,
) -> AppResult<Series> {
    let wells = linked_wells.linked_wells(well_project.id)?;
    let schedules: Vec<Series> = wells
        .iter()
        .filter_map(|w| w.drilling_schedule.as_ref())
        .map(|s| s.cast_f64())
        .collect();

    let wells_per_year = merge_all(&schedules);
    Ok(wells_per_year.scale(
        project.average_development_drilling_days * project.daily_emission_from_drilling_rig,
    ))
}

/// Total emissions in tonnes.
///
/// `fuel`, `flaring` and `losses` are volumes; each is weighted by its project
/// emission factor, the kg sum is converted to tonnes and `drilling` (already
/// in tonnes) is added on top.
pub fn combine_emissions(
    project: &Project,
    fuel: &Series,
    flaring: &Series,
    losses: &Series,
    drilling: &Series,
) -> Series {
    let facility_kg = merge_all(&[
        fuel_emissions(project, fuel),
        flaring_emissions(project, flaring),
        losses_emissions(project, losses),
    ]);
    let facility_tonnes = facility_kg.map(|&kg| kg_to_tonnes(kg));
    merge(&facility_tonnes, drilling)
}

/// Regenerates a case's CO2 emissions from its production and wells.
///
/// Collaborators are borrowed capabilities, so tests can swap any of them.
pub struct Co2EmissionsGenerator<'a> {
    pub cases: &'a dyn CaseLookup,
    pub topsides: &'a dyn TopsideLookup,
    pub projects: &'a dyn ProjectLookup,
    pub drainage_strategies: &'a dyn DrainageStrategyLookup,
    pub well_projects: &'a dyn WellProjectLookup,
    pub linked_wells: &'a dyn LinkedWellsLookup,
    pub persist: &'a dyn DrainageStrategyPersist,
}

impl<'a> Co2EmissionsGenerator<'a> {
    /// Take every capability from one repository.
    pub fn from_repository<R: Repository>(repository: &'a R) -> Self {
        Self {
            cases: repository,
            topsides: repository,
            projects: repository,
            drainage_strategies: repository,
            well_projects: repository,
            linked_wells: repository,
            persist: repository,
        }
    }

    /// Compute, store and return the emissions profile of `case_id`.
    ///
    /// Nothing is written unless every referenced entity exists. The stored
    /// emissions keep their id across regenerations.
    pub fn generate(&self, case_id: CaseId) -> AppResult<Co2EmissionsDto> {
        let case = self
            .cases
            .case(case_id)?
            .ok_or(AppError::not_found("case", case_id))?;
        let topside = self
            .topsides
            .topside(case.topside_link)?
            .ok_or(AppError::not_found("topside", case.topside_link))?;
        let project = self
            .projects
            .project(case.project_id)?
            .ok_or(AppError::not_found("project", case.project_id))?;
        let drainage_strategy = self
            .drainage_strategies
            .drainage_strategy(case.drainage_strategy_link)?
            .ok_or(AppError::not_found(
                "drainage strategy",
                case.drainage_strategy_link,
            ))?;
        let well_project = self
            .well_projects
            .well_project(case.well_project_link)?
            .ok_or(AppError::not_found("well project", case.well_project_link))?;

        let fuel = calculate_total_fuel_consumptions(&case, &topside, &drainage_strategy);
        let flaring = calculate_flaring(&project, &drainage_strategy);
        let losses = calculate_losses(&project, &drainage_strategy);
        let drilling = calculate_drilling_emissions(&project, &well_project, self.linked_wells)?;

        let total = combine_emissions(&project, &fuel, &flaring, &losses, &drilling);
        dcd_core::ensure_finite_series(&total, "co2 emissions")?;

        let mut updated = drainage_strategy;
        let emissions = updated.set_co2_emissions(total).clone();
        if let Err(err) = self.persist.save_drainage_strategy(&updated) {
            tracing::error!(case = %case_id, error = %err, "failed to store co2 emissions");
            return Err(err.into());
        }

        tracing::info!(
            case = %case_id,
            start_year = emissions.series.start_year,
            years = emissions.series.len(),
            "generated co2 emissions"
        );
        Ok(Co2EmissionsDto::from(&emissions))
    }
}

impl From<&dcd_model::Co2Emissions> for Co2EmissionsDto {
    fn from(emissions: &dcd_model::Co2Emissions) -> Self {
        Self {
            id: emissions.id,
            start_year: emissions.series.start_year,
            values: emissions.series.values.clone(),
        }
    }
}

impl Co2EmissionsDto {
    pub fn series(&self) -> Series {
        TimeSeries::new(self.start_year, self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcd_core::{Tolerances, new_id, series_nearly_equal};
    use dcd_model::{DrillingSchedule, ProjectDocument, WellCategory, WellProjectWell};
    use dcd_store::{MemoryStore, StoreResult};

    struct FixedWells(Vec<WellProjectWell>);

    impl LinkedWellsLookup for FixedWells {
        fn linked_wells(&self, _: dcd_core::AssetId) -> StoreResult<Vec<WellProjectWell>> {
            Ok(self.0.clone())
        }
    }

    fn linked(schedule: Option<DrillingSchedule>) -> WellProjectWell {
        WellProjectWell {
            well_id: new_id(),
            drilling_schedule: schedule,
        }
    }

    #[test]
    fn combine_matches_worked_example() {
        let doc = ProjectDocument::starter("Field", 2030);
        let mut project = doc.project.clone();
        project.co2_emission_from_fuel_gas = 2.0;
        project.co2_emissions_from_flared_gas = 1.0;
        project.co2_vented = 1.0;
        project.daily_emission_from_drilling_rig = 5.0;
        project.average_development_drilling_days = 10.0;
        let wells = FixedWells(vec![linked(Some(TimeSeries::new(2020, vec![3])))]);

        let drilling =
            calculate_drilling_emissions(&project, &doc.well_projects[0], &wells).unwrap();
        let total = combine_emissions(
            &project,
            &TimeSeries::new(2020, vec![100.0]),
            &TimeSeries::new(2020, vec![50.0]),
            &TimeSeries::new(2020, vec![10.0]),
            &drilling,
        );

        // (100 * 2 + 50 + 10) / 1000 + 3 * 10 * 5
        assert!(series_nearly_equal(
            &total,
            &TimeSeries::new(2020, vec![150.26]),
            Tolerances::default()
        ));
    }

    #[test]
    fn drilling_emissions_sum_schedules() {
        let doc = ProjectDocument::starter("Field", 2030);
        let mut project = doc.project.clone();
        project.average_development_drilling_days = 2.0;
        project.daily_emission_from_drilling_rig = 10.0;
        let wells = FixedWells(vec![
            linked(Some(TimeSeries::new(1, vec![1, 1]))),
            linked(None),
            linked(Some(TimeSeries::new(2, vec![2]))),
        ]);

        let emissions =
            calculate_drilling_emissions(&project, &doc.well_projects[0], &wells).unwrap();
        assert_eq!(emissions, TimeSeries::new(1, vec![20.0, 60.0]));
    }

    #[test]
    fn no_linked_wells_gives_empty_drilling_profile() {
        let doc = ProjectDocument::starter("Field", 2030);
        let emissions = calculate_drilling_emissions(
            &doc.project,
            &doc.well_projects[0],
            &FixedWells(Vec::new()),
        )
        .unwrap();
        assert!(emissions.is_empty());

        let facility = TimeSeries::new(2020, vec![1.0, 2.0]);
        assert_eq!(merge(&facility, &emissions), facility);
    }

    #[test]
    fn generator_reads_from_memory_store() {
        let mut doc = ProjectDocument::starter("Field", 2030);
        let well = dcd_model::Well {
            id: new_id(),
            name: "P1".to_string(),
            category: WellCategory::OilProducer,
            drilling_days: 50.0,
            well_cost: 0.0,
        };
        doc.well_projects[0].wells.push(WellProjectWell {
            well_id: well.id,
            drilling_schedule: Some(TimeSeries::new(-2, vec![1])),
        });
        doc.wells.push(well);
        let case_id = doc.cases[0].id;
        let store = MemoryStore::new(doc);

        let dto = Co2EmissionsGenerator::from_repository(&store)
            .generate(case_id)
            .unwrap();

        // 1 well * 50 days * 100 t/day with default factors
        assert_eq!(dto.start_year, -2);
        assert_eq!(dto.values, vec![5000.0]);
        assert_eq!(store.write_count(), 1);
    }
}
