pub mod cities;
pub mod config;
pub mod delay;
pub mod demand;
pub mod error;
pub mod gpx_export;
pub mod models;
pub mod random;
pub mod routing;
pub mod savings;
pub mod tracking;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::cities::CityTable;
use crate::config::AppConfig;
use crate::delay::DelayScorer;
use crate::error::RouteIqError;
use crate::gpx_export::encode_route_as_gpx;
use crate::models::{
    ApiError, City, DelayAssessment, DeliveryPosition, DemandForecast, ForecastQuery,
    OptimizeRouteRequest, OptimizeRouteResponse, ShipmentFeatures, TrackerQuery, ZoneSummary,
};
use crate::savings::{SavingsConfig, optimize_and_compare};

/// Tracker positions refresh on this period when no seed is requested.
const TRACKER_REFRESH_SECS: i64 = 30;

#[derive(Clone)]
pub struct AppState {
    pub cities: Arc<CityTable>,
    pub savings: SavingsConfig,
    pub delay: DelayScorer,
    pub seed: u64,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, RouteIqError> {
        let cities = match &config.cities_path {
            Some(path) => {
                let table = CityTable::from_file(path)?;
                tracing::info!("loaded {} cities from {}", table.len(), path.display());
                table
            }
            None => CityTable::builtin().clone(),
        };

        Ok(Self {
            cities: Arc::new(cities),
            savings: config.savings,
            delay: DelayScorer::new(config.seed),
            seed: config.seed,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/cities", get(list_cities))
        .route("/api/route/optimize", post(optimize_route))
        .route("/api/delay", post(score_delay))
        .route("/api/demand/:zone", get(demand_forecast))
        .route("/api/zones/summary", get(zones_summary))
        .route("/api/tracker", get(tracker))
        .layer(cors)
        .with_state(state)
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

async fn list_cities(State(state): State<AppState>) -> Json<Vec<City>> {
    Json(state.cities.cities().to_vec())
}

async fn optimize_route(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRouteRequest>,
) -> ApiResult<OptimizeRouteResponse> {
    tracing::info!("optimize request: {} stops, start {:?}", req.stops.len(), req.start);

    let comparison =
        optimize_and_compare(&state.cities, &req.stops, req.start.as_deref(), &state.savings)
            .map_err(api_error)?;
    let gpx_base64 = encode_route_as_gpx(&comparison.optimized_route, &comparison.optimized_path)
        .map_err(api_error)?;

    Ok(Json(OptimizeRouteResponse {
        comparison,
        gpx_base64,
    }))
}

async fn score_delay(
    State(state): State<AppState>,
    Json(features): Json<ShipmentFeatures>,
) -> ApiResult<DelayAssessment> {
    state.delay.score(&features).map(Json).map_err(api_error)
}

async fn demand_forecast(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<DemandForecast> {
    let today = chrono::Local::now().date_naive();
    demand::forecast_demand(&zone, query.days, today, state.seed)
        .map(Json)
        .map_err(api_error)
}

async fn zones_summary(State(state): State<AppState>) -> Json<Vec<ZoneSummary>> {
    let today = chrono::Local::now().date_naive();
    Json(demand::zones_summary(today, state.seed))
}

async fn tracker(Query(query): Query<TrackerQuery>) -> Json<Vec<DeliveryPosition>> {
    let seed = query.seed.unwrap_or_else(|| {
        (chrono::Utc::now().timestamp() / TRACKER_REFRESH_SECS).unsigned_abs()
    });
    Json(tracking::simulate_positions(seed))
}

fn api_error(err: impl Into<RouteIqError>) -> (StatusCode, Json<ApiError>) {
    let err = err.into();
    let status = match err {
        RouteIqError::Invalid(_) => {
            tracing::warn!("rejected request: {err}");
            StatusCode::BAD_REQUEST
        }
        _ => {
            tracing::error!("request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
