use std::collections::HashSet;

use crate::cities::CityTable;
use crate::error::InvalidInputError;
use crate::models::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6_371.0;
pub const DISTANCE_DECIMALS: i32 = 2;

/// Stops in visiting order together with their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedRoute {
    pub stops: Vec<String>,
    pub path: Vec<Coordinate>,
    pub distance_km: f64,
}

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    // Rounding can push h slightly outside [0, 1] near antipodes.
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon).clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn path_distance_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Drops repeated stops, keeping the first occurrence of each.
pub fn dedup_stops<S: AsRef<str>>(stops: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(stops.len());
    stops
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Resolves every stop against the table, failing on the first unknown name.
pub fn resolve_path<S: AsRef<str>>(
    table: &CityTable,
    stops: &[S],
) -> Result<Vec<Coordinate>, InvalidInputError> {
    stops
        .iter()
        .map(|name| table.coordinate(name.as_ref()))
        .collect()
}

/// Total distance of the route in the order given, rounded to
/// [`DISTANCE_DECIMALS`].
pub fn route_distance_km<S: AsRef<str>>(
    table: &CityTable,
    route: &[S],
) -> Result<f64, InvalidInputError> {
    let path = resolve_path(table, route)?;
    Ok(round_to(path_distance_km(&path), DISTANCE_DECIMALS))
}

/// Greedy nearest-neighbor ordering of `stops`.
///
/// Duplicated stops are visited once. The route begins at `start` when it is
/// one of the stops, otherwise at the first stop. At every step the closest
/// unvisited stop is chosen; on equal distances the one listed first wins.
///
/// # Errors
/// - [`InvalidInputError::EmptyStops`] when no stop is given
/// - [`InvalidInputError::UnknownCity`] when a stop is missing from `table`
pub fn sequence_route<S: AsRef<str>>(
    table: &CityTable,
    stops: &[S],
    start: Option<&str>,
) -> Result<SequencedRoute, InvalidInputError> {
    let unique = dedup_stops(stops);
    if unique.is_empty() {
        return Err(InvalidInputError::EmptyStops);
    }

    let mut unvisited = unique
        .iter()
        .map(|&name| table.coordinate(name).map(|coord| (name, coord)))
        .collect::<Result<Vec<_>, _>>()?;

    let start_idx = start
        .and_then(|wanted| unvisited.iter().position(|(name, _)| *name == wanted))
        .unwrap_or(0);
    let (start_name, mut current) = unvisited.remove(start_idx);

    let mut route = SequencedRoute {
        stops: Vec::with_capacity(unique.len()),
        path: Vec::with_capacity(unique.len()),
        distance_km: 0.0,
    };
    route.stops.push(start_name.to_string());
    route.path.push(current);

    let mut total_km = 0.0;
    while let Some((idx, leg_km)) = nearest(current, &unvisited) {
        let (name, coord) = unvisited.remove(idx);
        tracing::debug!("next stop {name} at {leg_km:.2} km");
        total_km += leg_km;
        route.stops.push(name.to_string());
        route.path.push(coord);
        current = coord;
    }

    route.distance_km = round_to(total_km, DISTANCE_DECIMALS);
    Ok(route)
}

fn nearest(from: Coordinate, candidates: &[(&str, Coordinate)]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, (_, coord)) in candidates.iter().enumerate() {
        let dist = haversine_km(from, *coord);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best
}
