//! Distance, fuel and cost saved by sequencing a route.
//!
//! The baseline is the caller's own stop order, so the figures describe how
//! much shorter the sequenced tour is than the order the stops arrived in.
//! They can be negative when the given order already beats the greedy tour.

use crate::cities::CityTable;
use crate::error::InvalidInputError;
use crate::models::{RouteComparison, SavingsRecord};
use crate::routing::{dedup_stops, resolve_path, round_to, route_distance_km, sequence_route};

/// Diesel consumption of a loaded truck, about 12 L per 100 km.
pub const DEFAULT_FUEL_L_PER_KM: f64 = 0.12;
pub const DEFAULT_DIESEL_INR_PER_L: f64 = 101.0;

const KM_DECIMALS: i32 = 2;
const PCT_DECIMALS: i32 = 1;
const LITRE_DECIMALS: i32 = 2;
const RUPEE_DECIMALS: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsConfig {
    pub fuel_l_per_km: f64,
    pub price_inr_per_litre: f64,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            fuel_l_per_km: DEFAULT_FUEL_L_PER_KM,
            price_inr_per_litre: DEFAULT_DIESEL_INR_PER_L,
        }
    }
}

pub fn compare_distances(original_km: f64, optimized_km: f64, config: &SavingsConfig) -> SavingsRecord {
    let savings_km = round_to(original_km - optimized_km, KM_DECIMALS);
    let savings_pct = if original_km > 0.0 {
        round_to(savings_km / original_km * 100.0, PCT_DECIMALS)
    } else {
        0.0
    };
    let fuel_saved_l = round_to(savings_km * config.fuel_l_per_km, LITRE_DECIMALS);
    let cost_saved_inr = round_to(fuel_saved_l * config.price_inr_per_litre, RUPEE_DECIMALS);

    SavingsRecord {
        original_distance_km: original_km,
        optimized_distance_km: optimized_km,
        savings_km,
        savings_pct,
        fuel_saved_l,
        cost_saved_inr,
    }
}

pub fn compare_routes<S: AsRef<str>>(
    table: &CityTable,
    original: &[S],
    optimized: &[S],
    config: &SavingsConfig,
) -> Result<SavingsRecord, InvalidInputError> {
    let original_km = route_distance_km(table, original)?;
    let optimized_km = route_distance_km(table, optimized)?;
    Ok(compare_distances(original_km, optimized_km, config))
}

/// Sequences `stops` and reports the result next to the as-given order.
pub fn optimize_and_compare<S: AsRef<str>>(
    table: &CityTable,
    stops: &[S],
    start: Option<&str>,
    config: &SavingsConfig,
) -> Result<RouteComparison, InvalidInputError> {
    let optimized = sequence_route(table, stops, start)?;
    let original_route = dedup_stops(stops);
    let original_path = resolve_path(table, &original_route)?;
    let original_km = route_distance_km(table, &original_route)?;
    let savings = compare_distances(original_km, optimized.distance_km, config);

    tracing::info!(
        "sequenced {} stops: {:.2} km -> {:.2} km (saved {:.2} km)",
        optimized.stops.len(),
        original_km,
        optimized.distance_km,
        savings.savings_km
    );

    Ok(RouteComparison {
        original_route: original_route.into_iter().map(str::to_string).collect(),
        optimized_route: optimized.stops,
        original_path,
        optimized_path: optimized.path,
        savings,
    })
}
