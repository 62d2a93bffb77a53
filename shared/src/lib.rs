use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(flatten)]
    pub coord: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRouteRequest {
    pub stops: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsRecord {
    pub original_distance_km: f64,
    pub optimized_distance_km: f64,
    pub savings_km: f64,
    pub savings_pct: f64,
    pub fuel_saved_l: f64,
    pub cost_saved_inr: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteComparison {
    pub original_route: Vec<String>,
    pub optimized_route: Vec<String>,
    pub original_path: Vec<Coordinate>,
    pub optimized_path: Vec<Coordinate>,
    pub savings: SavingsRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRouteResponse {
    #[serde(flatten)]
    pub comparison: RouteComparison,
    pub gpx_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentFeatures {
    pub distance_km: f64,
    pub weight_g: f64,
    /// Day of week the order was placed, 0 = Monday.
    pub order_dow: u8,
    pub order_month: u8,
    pub freight_value: f64,
    pub item_count: u32,
    pub seller_city: String,
    pub customer_city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayAssessment {
    pub probability: f64,
    pub tier: RiskTier,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub demand: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub zone: String,
    pub history: Vec<DemandPoint>,
    pub forecast: Vec<DemandPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandStatus {
    Normal,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub today_demand: u32,
    pub baseline: u32,
    pub status: DemandStatus,
    pub change_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    InTransit,
    Delayed,
    OnTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryPosition {
    pub id: String,
    pub driver: String,
    pub status: DeliveryStatus,
    pub from: Coordinate,
    pub to: Coordinate,
    pub position: Coordinate,
    pub progress: f64,
    pub eta_hours: u32,
    pub remaining_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
