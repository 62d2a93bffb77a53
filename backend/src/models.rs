pub use shared::{
    ApiError, City, Coordinate, DelayAssessment, DeliveryPosition, DeliveryStatus, DemandForecast,
    DemandPoint, DemandStatus, OptimizeRouteRequest, OptimizeRouteResponse, RiskTier,
    RouteComparison, SavingsRecord, ShipmentFeatures, ZoneSummary,
};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    #[serde(default = "default_horizon")]
    pub days: usize,
}

#[derive(Debug, Deserialize)]
pub struct TrackerQuery {
    pub seed: Option<u64>,
}

pub fn default_horizon() -> usize {
    7
}
