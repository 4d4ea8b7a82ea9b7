//! Application service layer for dcd.
//!
//! Services borrow the storage capabilities they need, so the CLI and the
//! tests drive the same code against file-backed or in-memory stores.

pub mod asset_service;
pub mod co2_emissions;
pub mod cost_service;
pub mod emission_helper;
pub mod error;
pub mod project_service;
pub mod settings;

// Re-export key types for convenience
pub use asset_service::AssetService;
pub use co2_emissions::{
    Co2EmissionsDto, Co2EmissionsGenerator, calculate_drilling_emissions, combine_emissions,
};
pub use cost_service::{
    CaseCostSummary, CostLine, CostService, effective_co2_emissions, effective_profile,
};
pub use error::{AppError, AppResult};
pub use project_service::{CaseSummary, create_project, list_cases, open_store, validate_project};
pub use settings::Settings;
