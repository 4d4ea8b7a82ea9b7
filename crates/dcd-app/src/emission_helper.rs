//! Volume and emission profiles derived from a case's production.
//!
//! Volumes are Sm3 per year, emissions are kg CO2 per year. Every function is
//! pure; a missing production profile simply contributes nothing.

use dcd_core::units::{DAYS_PER_YEAR, GAS_SM3_PER_OE_SM3, msm3_to_sm3};
use dcd_core::{TimeSeries, merge, merge_all};
use dcd_model::{Case, DrainageStrategy, Project, Series, Topside};

/// One production stream feeding the power model.
struct Stream<'a> {
    volumes: Option<&'a Series>,
    /// Sm3 per stream day.
    capacity: f64,
    share: f64,
    on_max: f64,
}

impl Stream<'_> {
    /// Share of total power used by this stream per year.
    fn power(&self, availability: f64) -> Series {
        let Some(volumes) = self.volumes else {
            return TimeSeries::empty();
        };
        let yearly_capacity = self.capacity * DAYS_PER_YEAR * availability;
        if yearly_capacity <= 0.0 {
            return TimeSeries::empty();
        }
        volumes.map(|&v| {
            if v > 0.0 {
                let utilisation = v / yearly_capacity;
                self.share * (self.on_max * utilisation + (1.0 - self.on_max))
            } else {
                0.0
            }
        })
    }
}

/// Fraction of installed power in use per year, summed over oil, gas and
/// water injection.
pub fn calculate_total_use_of_power(
    case: &Case,
    topside: &Topside,
    drainage_strategy: &DrainageStrategy,
) -> Series {
    let streams = [
        Stream {
            volumes: drainage_strategy.oil(),
            capacity: topside.oil_capacity,
            share: topside.co2_share_oil_profile,
            on_max: topside.co2_on_max_oil_profile,
        },
        Stream {
            volumes: drainage_strategy.gas(),
            capacity: msm3_to_sm3(topside.gas_capacity),
            share: topside.co2_share_gas_profile,
            on_max: topside.co2_on_max_gas_profile,
        },
        Stream {
            volumes: drainage_strategy.water_injection(),
            capacity: topside.water_injection_capacity,
            share: topside.co2_share_water_injection_profile,
            on_max: topside.co2_on_max_water_injection_profile,
        },
    ];

    let powers: Vec<Series> = streams
        .iter()
        .map(|s| s.power(case.facilities_availability))
        .collect();
    merge_all(&powers)
}

/// Fuel gas burnt per year (Sm3).
pub fn calculate_total_fuel_consumptions(
    case: &Case,
    topside: &Topside,
    drainage_strategy: &DrainageStrategy,
) -> Series {
    let power = calculate_total_use_of_power(case, topside, drainage_strategy);
    let fuel_at_max_load = msm3_to_sm3(topside.fuel_consumption)
        * DAYS_PER_YEAR
        * case.facilities_availability;
    power.scale(fuel_at_max_load)
}

/// Oil-equivalent production per year (Sm3).
pub fn oil_equivalent(drainage_strategy: &DrainageStrategy) -> Series {
    let empty = TimeSeries::empty();
    let oil = drainage_strategy.oil().unwrap_or(&empty);
    let gas = drainage_strategy
        .gas()
        .map(|g| g.scale(1.0 / GAS_SM3_PER_OE_SM3))
        .unwrap_or_default();
    merge(oil, &gas)
}

/// Gas flared per year (Sm3).
pub fn calculate_flaring(project: &Project, drainage_strategy: &DrainageStrategy) -> Series {
    oil_equivalent(drainage_strategy).scale(project.flared_gas_per_produced_volume)
}

/// CO2 removed from the produced gas per year.
pub fn calculate_losses(project: &Project, drainage_strategy: &DrainageStrategy) -> Series {
    drainage_strategy
        .gas()
        .map(|g| g.scale(project.co2_removed_from_gas))
        .unwrap_or_default()
}

/// kg CO2 from burning `fuel` Sm3 of fuel gas.
pub fn fuel_emissions(project: &Project, fuel: &Series) -> Series {
    fuel.scale(project.co2_emission_from_fuel_gas)
}

/// kg CO2 from flaring `flaring` Sm3 of gas.
pub fn flaring_emissions(project: &Project, flaring: &Series) -> Series {
    flaring.scale(project.co2_emissions_from_flared_gas)
}

/// kg CO2 vented from processing `losses`.
pub fn losses_emissions(project: &Project, losses: &Series) -> Series {
    losses.scale(project.co2_vented)
}
