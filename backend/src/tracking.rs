//! Simulated positions for the active deliveries shown on the tracker.
//!
//! Positions are a straight-line interpolation between origin and destination
//! with a small random jitter; nothing here reflects real vehicle telemetry.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::{Coordinate, DeliveryPosition, DeliveryStatus};
use crate::routing::{haversine_km, round_to};

const JITTER_DEG: f64 = 0.05;
const MIN_PROGRESS: f64 = 0.1;
const MAX_PROGRESS: f64 = 0.9;
const MIN_TRIP_HOURS: u32 = 4;
const MAX_TRIP_HOURS: u32 = 24;

struct Delivery {
    id: &'static str,
    driver: &'static str,
    status: DeliveryStatus,
    from: Coordinate,
    to: Coordinate,
}

const fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate { lat, lon }
}

const ACTIVE_DELIVERIES: [Delivery; 5] = [
    Delivery {
        id: "DEL-2841",
        driver: "Ravi Kumar",
        status: DeliveryStatus::InTransit,
        from: coord(13.0827, 80.2707),
        to: coord(19.0760, 72.8777),
    },
    Delivery {
        id: "DEL-2840",
        driver: "Suresh M",
        status: DeliveryStatus::Delayed,
        from: coord(28.6139, 77.2090),
        to: coord(12.9716, 77.5946),
    },
    Delivery {
        id: "DEL-2839",
        driver: "Priya S",
        status: DeliveryStatus::InTransit,
        from: coord(18.5204, 73.8567),
        to: coord(17.3850, 78.4867),
    },
    Delivery {
        id: "DEL-2838",
        driver: "Karthik R",
        status: DeliveryStatus::OnTime,
        from: coord(22.5726, 88.3639),
        to: coord(13.0827, 80.2707),
    },
    Delivery {
        id: "DEL-2837",
        driver: "Anbu T",
        status: DeliveryStatus::InTransit,
        from: coord(19.0760, 72.8777),
        to: coord(23.0225, 72.5714),
    },
];

pub fn simulate_positions(seed: u64) -> Vec<DeliveryPosition> {
    let mut rng = StdRng::seed_from_u64(seed);
    ACTIVE_DELIVERIES
        .iter()
        .map(|delivery| {
            let progress = rng.gen_range(MIN_PROGRESS..MAX_PROGRESS);
            let mut position = delivery.from.interpolate(delivery.to, progress);
            position.lat += rng.gen_range(-JITTER_DEG..JITTER_DEG);
            position.lon += rng.gen_range(-JITTER_DEG..JITTER_DEG);
            let trip_hours = rng.gen_range(MIN_TRIP_HOURS..MAX_TRIP_HOURS);

            DeliveryPosition {
                id: delivery.id.to_string(),
                driver: delivery.driver.to_string(),
                status: delivery.status,
                from: delivery.from,
                to: delivery.to,
                position,
                progress: round_to(progress, 2),
                eta_hours: ((1.0 - progress) * f64::from(trip_hours)) as u32,
                remaining_km: round_to(haversine_km(position, delivery.to), 1),
            }
        })
        .collect()
}
