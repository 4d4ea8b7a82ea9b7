//! Entity schema definitions.

use chrono::{DateTime, Utc};
use dcd_core::{AssetId, CaseId, Id, ProfileId, ProjectId, TimeSeries, WellId, new_id};
use serde::{Deserialize, Serialize};

/// Yearly cost/volume/emission values.
pub type Series = TimeSeries<f64>;

/// Wells drilled per year.
pub type DrillingSchedule = TimeSeries<i32>;

/// A persisted profile: an identified yearly series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(flatten)]
    pub series: Series,
}

impl Profile {
    pub fn new(series: Series) -> Self {
        Self {
            id: new_id(),
            series,
        }
    }
}

/// Manually entered profile that replaces a computed one while `override_active` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileOverride {
    pub id: ProfileId,
    #[serde(flatten)]
    pub series: Series,
    #[serde(default)]
    pub override_active: bool,
}

impl ProfileOverride {
    pub fn new(series: Series, override_active: bool) -> Self {
        Self {
            id: new_id(),
            series,
            override_active,
        }
    }
}

/// Computed CO2 emissions (tonnes per year) owned by a drainage strategy.
pub type Co2Emissions = Profile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Nok,
    Usd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PhysUnit {
    #[default]
    Si,
    OilField,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProjectClassification {
    Open,
    #[default]
    Internal,
    Restricted,
    Confidential,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProjectPhase {
    #[default]
    Null,
    BidPreparations,
    BusinessIdentification,
    BusinessPlanning,
    ConceptPlanning,
    ConcessionNegotiations,
    Definition,
    Execution,
    Operation,
    ScreeningBusinessOpportunities,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProjectCategory {
    #[default]
    Null,
    OffshoreWind,
    Gas,
    Oil,
    Onshore,
    Subsea,
    Cessation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Maturity {
    #[default]
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Concept {
    #[default]
    NoConcept,
    TieBack,
    Jacket,
    Gbs,
    Tlp,
    Spar,
    Semi,
    CircularBarge,
    Barge,
    Fpso,
    Tanker,
    JackUp,
    SubseaToShore,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WellCategory {
    OilProducer,
    GasProducer,
    WaterInjector,
    GasInjector,
    ExplorationWell,
    AppraisalWell,
    Sidetrack,
}

fn default_co2_removed_from_gas() -> f64 {
    1.96
}
fn default_co2_emission_from_fuel_gas() -> f64 {
    2.34
}
fn default_flared_gas_per_produced_volume() -> f64 {
    1.122
}
fn default_co2_emissions_from_flared_gas() -> f64 {
    3.74
}
fn default_co2_vented() -> f64 {
    1.96
}
fn default_daily_emission_from_drilling_rig() -> f64 {
    100.0
}
fn default_average_development_drilling_days() -> f64 {
    50.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub physical_unit: PhysUnit,
    #[serde(default)]
    pub classification: ProjectClassification,
    #[serde(default)]
    pub phase: ProjectPhase,
    #[serde(default)]
    pub category: ProjectCategory,
    pub create_date: DateTime<Utc>,

    // Per-unit emission factors
    #[serde(default = "default_co2_removed_from_gas")]
    pub co2_removed_from_gas: f64,
    #[serde(default = "default_co2_emission_from_fuel_gas")]
    pub co2_emission_from_fuel_gas: f64,
    #[serde(default = "default_flared_gas_per_produced_volume")]
    pub flared_gas_per_produced_volume: f64,
    #[serde(default = "default_co2_emissions_from_flared_gas")]
    pub co2_emissions_from_flared_gas: f64,
    #[serde(default = "default_co2_vented")]
    pub co2_vented: f64,
    #[serde(default = "default_daily_emission_from_drilling_rig")]
    pub daily_emission_from_drilling_rig: f64,
    #[serde(default = "default_average_development_drilling_days")]
    pub average_development_drilling_days: f64,
}

impl Project {
    /// New project with the default emission factors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: String::new(),
            country: String::new(),
            currency: Currency::default(),
            physical_unit: PhysUnit::default(),
            classification: ProjectClassification::default(),
            phase: ProjectPhase::default(),
            category: ProjectCategory::default(),
            create_date: Utc::now(),
            co2_removed_from_gas: default_co2_removed_from_gas(),
            co2_emission_from_fuel_gas: default_co2_emission_from_fuel_gas(),
            flared_gas_per_produced_volume: default_flared_gas_per_produced_volume(),
            co2_emissions_from_flared_gas: default_co2_emissions_from_flared_gas(),
            co2_vented: default_co2_vented(),
            daily_emission_from_drilling_rig: default_daily_emission_from_drilling_rig(),
            average_development_drilling_days: default_average_development_drilling_days(),
        }
    }
}

fn default_facilities_availability() -> f64 {
    0.93
}

/// One development scenario. Links (not owns) the assets it is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: CaseId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Calendar year of the DG4 milestone; stored profiles are relative to it.
    pub dg4_year: i32,
    /// Fraction of the year the facilities are producing, in (0, 1].
    #[serde(default = "default_facilities_availability")]
    pub facilities_availability: f64,
    pub modify_time: DateTime<Utc>,
    pub topside_link: AssetId,
    pub substructure_link: AssetId,
    pub surf_link: AssetId,
    pub transport_link: AssetId,
    pub exploration_link: AssetId,
    pub drainage_strategy_link: AssetId,
    pub well_project_link: AssetId,
}

impl Case {
    pub fn asset_link(&self, kind: AssetKind) -> AssetId {
        match kind {
            AssetKind::Topside => self.topside_link,
            AssetKind::Substructure => self.substructure_link,
            AssetKind::Surf => self.surf_link,
            AssetKind::Transport => self.transport_link,
        }
    }

    pub fn set_asset_link(&mut self, kind: AssetKind, id: AssetId) {
        match kind {
            AssetKind::Topside => self.topside_link = id,
            AssetKind::Substructure => self.substructure_link = id,
            AssetKind::Surf => self.surf_link = id,
            AssetKind::Transport => self.transport_link = id,
        }
    }
}

/// Cost profiles shared by every facility asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AssetProfiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_profile_override: Option<ProfileOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cessation_cost_profile: Option<Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topside {
    pub id: AssetId,
    pub name: String,
    #[serde(flatten)]
    pub profiles: AssetProfiles,
    #[serde(default)]
    pub dry_weight: f64,
    #[serde(default)]
    pub maturity: Maturity,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<DateTime<Utc>>,

    /// Fuel gas at maximum load, MSm3 per stream day.
    #[serde(default)]
    pub fuel_consumption: f64,
    /// Sm3 per stream day.
    #[serde(default)]
    pub oil_capacity: f64,
    /// MSm3 per stream day.
    #[serde(default)]
    pub gas_capacity: f64,
    /// Sm3 per stream day.
    #[serde(default)]
    pub water_injection_capacity: f64,
    #[serde(default)]
    pub co2_share_oil_profile: f64,
    #[serde(default)]
    pub co2_share_gas_profile: f64,
    #[serde(default)]
    pub co2_share_water_injection_profile: f64,
    #[serde(default)]
    pub co2_on_max_oil_profile: f64,
    #[serde(default)]
    pub co2_on_max_gas_profile: f64,
    #[serde(default)]
    pub co2_on_max_water_injection_profile: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Substructure {
    pub id: AssetId,
    pub name: String,
    #[serde(flatten)]
    pub profiles: AssetProfiles,
    #[serde(default)]
    pub dry_weight: f64,
    #[serde(default)]
    pub maturity: Maturity,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub concept: Concept,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Surf {
    pub id: AssetId,
    pub name: String,
    #[serde(flatten)]
    pub profiles: AssetProfiles,
    #[serde(default)]
    pub maturity: Maturity,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transport {
    pub id: AssetId,
    pub name: String,
    #[serde(flatten)]
    pub profiles: AssetProfiles,
    #[serde(default)]
    pub maturity: Maturity,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Topside,
    Substructure,
    Surf,
    Transport,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Topside,
        AssetKind::Substructure,
        AssetKind::Surf,
        AssetKind::Transport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Topside => "topside",
            AssetKind::Substructure => "substructure",
            AssetKind::Surf => "surf",
            AssetKind::Transport => "transport",
        }
    }
}

/// Any facility asset carrying [`AssetProfiles`].
#[derive(Debug, Clone, PartialEq)]
pub enum FacilityAsset {
    Topside(Topside),
    Substructure(Substructure),
    Surf(Surf),
    Transport(Transport),
}

impl FacilityAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            FacilityAsset::Topside(_) => AssetKind::Topside,
            FacilityAsset::Substructure(_) => AssetKind::Substructure,
            FacilityAsset::Surf(_) => AssetKind::Surf,
            FacilityAsset::Transport(_) => AssetKind::Transport,
        }
    }

    pub fn id(&self) -> AssetId {
        match self {
            FacilityAsset::Topside(a) => a.id,
            FacilityAsset::Substructure(a) => a.id,
            FacilityAsset::Surf(a) => a.id,
            FacilityAsset::Transport(a) => a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FacilityAsset::Topside(a) => &a.name,
            FacilityAsset::Substructure(a) => &a.name,
            FacilityAsset::Surf(a) => &a.name,
            FacilityAsset::Transport(a) => &a.name,
        }
    }

    pub fn profiles(&self) -> &AssetProfiles {
        match self {
            FacilityAsset::Topside(a) => &a.profiles,
            FacilityAsset::Substructure(a) => &a.profiles,
            FacilityAsset::Surf(a) => &a.profiles,
            FacilityAsset::Transport(a) => &a.profiles,
        }
    }

    pub fn profiles_mut(&mut self) -> &mut AssetProfiles {
        match self {
            FacilityAsset::Topside(a) => &mut a.profiles,
            FacilityAsset::Substructure(a) => &mut a.profiles,
            FacilityAsset::Surf(a) => &mut a.profiles,
            FacilityAsset::Transport(a) => &mut a.profiles,
        }
    }

    pub fn set_id(&mut self, id: AssetId) {
        match self {
            FacilityAsset::Topside(a) => a.id = id,
            FacilityAsset::Substructure(a) => a.id = id,
            FacilityAsset::Surf(a) => a.id = id,
            FacilityAsset::Transport(a) => a.id = id,
        }
    }

    pub fn set_last_changed(&mut self, at: DateTime<Utc>) {
        let slot = match self {
            FacilityAsset::Topside(a) => &mut a.last_changed_date,
            FacilityAsset::Substructure(a) => &mut a.last_changed_date,
            FacilityAsset::Surf(a) => &mut a.last_changed_date,
            FacilityAsset::Transport(a) => &mut a.last_changed_date,
        };
        *slot = Some(at);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exploration {
    pub id: AssetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploration_well_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appraisal_well_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidetrack_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seismic_acquisition_and_processing: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_office_cost: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_and_g_admin_cost: Option<Profile>,
}

/// Reservoir depletion plan. Owns the production profiles and the derived CO2 emissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrainageStrategy {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Sm3 per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_profile_oil: Option<Profile>,
    /// Sm3 per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_profile_gas: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_profile_water: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_profile_water_injection: Option<Profile>,
    /// Regenerated from the case inputs; never edited directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions: Option<Co2Emissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions_override: Option<ProfileOverride>,
}

impl DrainageStrategy {
    /// Replace the emissions profile with `total` and return it.
    ///
    /// Keeps the id of an existing emissions profile, otherwise allocates one.
    pub fn set_co2_emissions(&mut self, total: Series) -> &Co2Emissions {
        let id = self
            .co2_emissions
            .as_ref()
            .map(|p| p.id)
            .unwrap_or_else(new_id);
        self.co2_emissions.insert(Profile { id, series: total })
    }

    /// Copy of this strategy carrying `total` as its CO2 emissions.
    pub fn with_co2_emissions(&self, total: Series) -> DrainageStrategy {
        let mut updated = self.clone();
        updated.set_co2_emissions(total);
        updated
    }

    pub fn oil(&self) -> Option<&Series> {
        self.production_profile_oil.as_ref().map(|p| &p.series)
    }

    pub fn gas(&self) -> Option<&Series> {
        self.production_profile_gas.as_ref().map(|p| &p.series)
    }

    pub fn water_injection(&self) -> Option<&Series> {
        self.production_profile_water_injection
            .as_ref()
            .map(|p| &p.series)
    }
}

/// A well linked into a well project, optionally with its drilling schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellProjectWell {
    pub well_id: WellId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilling_schedule: Option<DrillingSchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellProject {
    pub id: AssetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil_producer_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_producer_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_injector_cost_profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_injector_cost_profile: Option<Profile>,
    #[serde(default)]
    pub wells: Vec<WellProjectWell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Well {
    pub id: WellId,
    pub name: String,
    pub category: WellCategory,
    #[serde(default)]
    pub drilling_days: f64,
    #[serde(default)]
    pub well_cost: f64,
}

/// The persisted unit: one project and every entity its cases reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDocument {
    pub version: u32,
    pub project: Project,
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default)]
    pub topsides: Vec<Topside>,
    #[serde(default)]
    pub substructures: Vec<Substructure>,
    #[serde(default)]
    pub surfs: Vec<Surf>,
    #[serde(default)]
    pub transports: Vec<Transport>,
    #[serde(default)]
    pub explorations: Vec<Exploration>,
    #[serde(default)]
    pub drainage_strategies: Vec<DrainageStrategy>,
    #[serde(default)]
    pub well_projects: Vec<WellProject>,
    #[serde(default)]
    pub wells: Vec<Well>,
}

impl ProjectDocument {
    pub fn new(project: Project) -> Self {
        Self {
            version: crate::DOCUMENT_VERSION,
            project,
            cases: Vec::new(),
            topsides: Vec::new(),
            substructures: Vec::new(),
            surfs: Vec::new(),
            transports: Vec::new(),
            explorations: Vec::new(),
            drainage_strategies: Vec::new(),
            well_projects: Vec::new(),
            wells: Vec::new(),
        }
    }

    /// A new document holding one base case linked to empty assets.
    pub fn starter(project_name: &str, dg4_year: i32) -> Self {
        let project = Project::new(project_name);
        let now = Utc::now();

        let topside = Topside {
            id: new_id(),
            name: "Topside".to_string(),
            profiles: AssetProfiles::default(),
            dry_weight: 0.0,
            maturity: Maturity::default(),
            currency: project.currency,
            last_changed_date: Some(now),
            fuel_consumption: 0.0,
            oil_capacity: 0.0,
            gas_capacity: 0.0,
            water_injection_capacity: 0.0,
            co2_share_oil_profile: 0.0,
            co2_share_gas_profile: 0.0,
            co2_share_water_injection_profile: 0.0,
            co2_on_max_oil_profile: 0.0,
            co2_on_max_gas_profile: 0.0,
            co2_on_max_water_injection_profile: 0.0,
        };
        let substructure = Substructure {
            id: new_id(),
            name: "Substructure".to_string(),
            profiles: AssetProfiles::default(),
            dry_weight: 0.0,
            maturity: Maturity::default(),
            currency: project.currency,
            concept: Concept::default(),
            last_changed_date: Some(now),
        };
        let surf = Surf {
            id: new_id(),
            name: "SURF".to_string(),
            profiles: AssetProfiles::default(),
            maturity: Maturity::default(),
            currency: project.currency,
            last_changed_date: Some(now),
        };
        let transport = Transport {
            id: new_id(),
            name: "Transport".to_string(),
            profiles: AssetProfiles::default(),
            maturity: Maturity::default(),
            currency: project.currency,
            last_changed_date: Some(now),
        };
        let exploration = Exploration {
            id: new_id(),
            name: "Exploration".to_string(),
            exploration_well_cost_profile: None,
            appraisal_well_cost_profile: None,
            sidetrack_cost_profile: None,
            seismic_acquisition_and_processing: None,
            country_office_cost: None,
            g_and_g_admin_cost: None,
        };
        let drainage_strategy = DrainageStrategy {
            id: new_id(),
            name: "Drainage strategy".to_string(),
            description: String::new(),
            production_profile_oil: None,
            production_profile_gas: None,
            production_profile_water: None,
            production_profile_water_injection: None,
            co2_emissions: None,
            co2_emissions_override: None,
        };
        let well_project = WellProject {
            id: new_id(),
            name: "Well project".to_string(),
            oil_producer_cost_profile: None,
            gas_producer_cost_profile: None,
            water_injector_cost_profile: None,
            gas_injector_cost_profile: None,
            wells: Vec::new(),
        };
        let case = Case {
            id: new_id(),
            project_id: project.id,
            name: "Base case".to_string(),
            description: String::new(),
            dg4_year,
            facilities_availability: default_facilities_availability(),
            modify_time: now,
            topside_link: topside.id,
            substructure_link: substructure.id,
            surf_link: surf.id,
            transport_link: transport.id,
            exploration_link: exploration.id,
            drainage_strategy_link: drainage_strategy.id,
            well_project_link: well_project.id,
        };

        Self {
            cases: vec![case],
            topsides: vec![topside],
            substructures: vec![substructure],
            surfs: vec![surf],
            transports: vec![transport],
            explorations: vec![exploration],
            drainage_strategies: vec![drainage_strategy],
            well_projects: vec![well_project],
            ..Self::new(project)
        }
    }

    pub fn case(&self, id: Id) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn topside(&self, id: Id) -> Option<&Topside> {
        self.topsides.iter().find(|t| t.id == id)
    }

    pub fn drainage_strategy(&self, id: Id) -> Option<&DrainageStrategy> {
        self.drainage_strategies.iter().find(|d| d.id == id)
    }

    pub fn well_project(&self, id: Id) -> Option<&WellProject> {
        self.well_projects.iter().find(|w| w.id == id)
    }

    pub fn exploration(&self, id: Id) -> Option<&Exploration> {
        self.explorations.iter().find(|e| e.id == id)
    }

    pub fn asset(&self, kind: AssetKind, id: Id) -> Option<FacilityAsset> {
        match kind {
            AssetKind::Topside => self.topside(id).cloned().map(FacilityAsset::Topside),
            AssetKind::Substructure => self
                .substructures
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .map(FacilityAsset::Substructure),
            AssetKind::Surf => self
                .surfs
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .map(FacilityAsset::Surf),
            AssetKind::Transport => self
                .transports
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .map(FacilityAsset::Transport),
        }
    }

    /// Replace the asset with the same id, or append it when it is new.
    pub fn upsert_asset(&mut self, asset: FacilityAsset) {
        match asset {
            FacilityAsset::Topside(a) => upsert(&mut self.topsides, a, |x| x.id),
            FacilityAsset::Substructure(a) => upsert(&mut self.substructures, a, |x| x.id),
            FacilityAsset::Surf(a) => upsert(&mut self.surfs, a, |x| x.id),
            FacilityAsset::Transport(a) => upsert(&mut self.transports, a, |x| x.id),
        }
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> Id) {
    let id = id_of(&item);
    match items.iter_mut().find(|x| id_of(x) == id) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_co2_emissions_keeps_existing_id() {
        let doc = ProjectDocument::starter("Field", 2030);
        let strategy = doc.drainage_strategies[0].clone();

        let first = strategy.with_co2_emissions(TimeSeries::new(0, vec![1.0]));
        let first_id = first.co2_emissions.as_ref().map(|p| p.id).unwrap();

        let second = first.with_co2_emissions(TimeSeries::new(1, vec![2.0, 3.0]));
        let emissions = second.co2_emissions.unwrap();
        assert_eq!(emissions.id, first_id);
        assert_eq!(emissions.series, TimeSeries::new(1, vec![2.0, 3.0]));
        // the source value is untouched
        assert!(strategy.co2_emissions.is_none());
    }

    #[test]
    fn set_co2_emissions_returns_stored_profile() {
        let mut strategy = ProjectDocument::starter("Field", 2030).drainage_strategies[0].clone();

        let first_id = strategy.set_co2_emissions(TimeSeries::new(0, vec![1.0])).id;
        let second = strategy.set_co2_emissions(TimeSeries::new(2, vec![5.0])).clone();

        assert_eq!(second.id, first_id);
        assert_eq!(strategy.co2_emissions, Some(second));
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let mut doc = ProjectDocument::starter("Field", 2030);
        let mut asset = doc.asset(AssetKind::Surf, doc.surfs[0].id).unwrap();
        asset.profiles_mut().cost_profile = Some(Profile::new(TimeSeries::new(0, vec![5.0])));
        doc.upsert_asset(asset.clone());
        assert_eq!(doc.surfs.len(), 1);
        assert!(doc.surfs[0].profiles.cost_profile.is_some());

        asset.set_id(new_id());
        doc.upsert_asset(asset);
        assert_eq!(doc.surfs.len(), 2);
    }

    #[test]
    fn case_links_by_kind() {
        let doc = ProjectDocument::starter("Field", 2030);
        let mut case = doc.cases[0].clone();
        for kind in AssetKind::ALL {
            assert!(doc.asset(kind, case.asset_link(kind)).is_some());
        }
        let id = new_id();
        case.set_asset_link(AssetKind::Transport, id);
        assert_eq!(case.transport_link, id);
    }
}
