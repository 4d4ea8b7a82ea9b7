//! Project document validation logic.

use crate::schema::{AssetProfiles, Case, Profile, ProfileOverride, ProjectDocument};
use dcd_core::{CoreError, Id, ensure_finite_series};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: Id, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: Id, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error(transparent)]
    NonFinite(#[from] CoreError),
}

pub fn validate_document(document: &ProjectDocument) -> Result<(), ValidationError> {
    if document.version == 0 || document.version > crate::DOCUMENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: document.version,
        });
    }

    unique_ids(document.cases.iter().map(|c| c.id), "cases")?;
    let topsides = unique_ids(document.topsides.iter().map(|a| a.id), "topsides")?;
    let substructures = unique_ids(
        document.substructures.iter().map(|a| a.id),
        "substructures",
    )?;
    let surfs = unique_ids(document.surfs.iter().map(|a| a.id), "surfs")?;
    let transports = unique_ids(document.transports.iter().map(|a| a.id), "transports")?;
    let explorations = unique_ids(document.explorations.iter().map(|a| a.id), "explorations")?;
    let drainage_strategies = unique_ids(
        document.drainage_strategies.iter().map(|a| a.id),
        "drainage strategies",
    )?;
    let well_projects = unique_ids(
        document.well_projects.iter().map(|a| a.id),
        "well projects",
    )?;
    let wells = unique_ids(document.wells.iter().map(|w| w.id), "wells")?;

    for case in &document.cases {
        if case.project_id != document.project.id {
            return Err(ValidationError::MissingReference {
                id: case.project_id,
                context: format!("case '{}' project_id", case.name),
            });
        }
        validate_case_links(
            case,
            &[
                (case.topside_link, &topsides, "topside_link"),
                (case.substructure_link, &substructures, "substructure_link"),
                (case.surf_link, &surfs, "surf_link"),
                (case.transport_link, &transports, "transport_link"),
                (case.exploration_link, &explorations, "exploration_link"),
                (
                    case.drainage_strategy_link,
                    &drainage_strategies,
                    "drainage_strategy_link",
                ),
                (case.well_project_link, &well_projects, "well_project_link"),
            ],
        )?;
        if !(case.facilities_availability > 0.0 && case.facilities_availability <= 1.0) {
            return Err(ValidationError::InvalidValue {
                field: format!("case '{}' facilities_availability", case.name),
                value: case.facilities_availability.to_string(),
                reason: "must be in (0, 1]".to_string(),
            });
        }
    }

    for well_project in &document.well_projects {
        for linked in &well_project.wells {
            if !wells.contains(&linked.well_id) {
                return Err(ValidationError::MissingReference {
                    id: linked.well_id,
                    context: format!("well project '{}' wells", well_project.name),
                });
            }
        }
        for profile in [
            &well_project.oil_producer_cost_profile,
            &well_project.gas_producer_cost_profile,
            &well_project.water_injector_cost_profile,
            &well_project.gas_injector_cost_profile,
        ] {
            check_profile(profile.as_ref(), &well_project.name)?;
        }
    }

    for topside in &document.topsides {
        check_asset_profiles(&topside.profiles, &topside.name)?;
    }
    for substructure in &document.substructures {
        check_asset_profiles(&substructure.profiles, &substructure.name)?;
    }
    for surf in &document.surfs {
        check_asset_profiles(&surf.profiles, &surf.name)?;
    }
    for transport in &document.transports {
        check_asset_profiles(&transport.profiles, &transport.name)?;
    }

    for exploration in &document.explorations {
        for profile in [
            &exploration.exploration_well_cost_profile,
            &exploration.appraisal_well_cost_profile,
            &exploration.sidetrack_cost_profile,
            &exploration.seismic_acquisition_and_processing,
            &exploration.country_office_cost,
            &exploration.g_and_g_admin_cost,
        ] {
            check_profile(profile.as_ref(), &exploration.name)?;
        }
    }

    for strategy in &document.drainage_strategies {
        for profile in [
            &strategy.production_profile_oil,
            &strategy.production_profile_gas,
            &strategy.production_profile_water,
            &strategy.production_profile_water_injection,
            &strategy.co2_emissions,
        ] {
            check_profile(profile.as_ref(), &strategy.name)?;
        }
        check_override(strategy.co2_emissions_override.as_ref(), &strategy.name)?;
    }

    Ok(())
}

fn unique_ids(
    ids: impl Iterator<Item = Id>,
    context: &str,
) -> Result<HashSet<Id>, ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                id,
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn validate_case_links(
    case: &Case,
    links: &[(Id, &HashSet<Id>, &str)],
) -> Result<(), ValidationError> {
    for (id, known, field) in links {
        if !known.contains(id) {
            return Err(ValidationError::MissingReference {
                id: *id,
                context: format!("case '{}' {}", case.name, field),
            });
        }
    }
    Ok(())
}

fn check_asset_profiles(profiles: &AssetProfiles, owner: &str) -> Result<(), ValidationError> {
    check_profile(profiles.cost_profile.as_ref(), owner)?;
    check_profile(profiles.cessation_cost_profile.as_ref(), owner)?;
    check_override(profiles.cost_profile_override.as_ref(), owner)
}

fn check_profile(profile: Option<&Profile>, owner: &str) -> Result<(), ValidationError> {
    if let Some(profile) = profile {
        ensure_finite_series(&profile.series, owner)?;
    }
    Ok(())
}

fn check_override(profile: Option<&ProfileOverride>, owner: &str) -> Result<(), ValidationError> {
    if let Some(profile) = profile {
        ensure_finite_series(&profile.series, owner)?;
    }
    Ok(())
}
