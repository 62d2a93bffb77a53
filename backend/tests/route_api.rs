use axum::{
    body::{Body, Bytes, to_bytes},
    http::Request,
};
use hyper::StatusCode;
use routeiq::{
    AppState,
    config::AppConfig,
    create_router,
    models::{
        ApiError, City, DelayAssessment, DeliveryPosition, DemandForecast, OptimizeRouteRequest,
        OptimizeRouteResponse, RiskTier, ZoneSummary,
    },
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let state = AppState::from_config(&AppConfig::default()).expect("state");
    create_router(state)
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes)
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn optimize_endpoint_returns_route_and_gpx() {
    let payload = json!({
        "stops": ["Chennai", "Hyderabad", "Bangalore"],
        "start": "Chennai"
    });

    let (status, bytes) = send(test_app(), post_json("/api/route/optimize", payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let body: OptimizeRouteResponse = parse(&bytes);
    assert_eq!(
        body.comparison.optimized_route,
        ["Chennai", "Bangalore", "Hyderabad"]
    );
    assert_eq!(body.comparison.original_route, ["Chennai", "Hyderabad", "Bangalore"]);
    assert_eq!(body.comparison.savings.optimized_distance_km, 790.17);
    assert_eq!(body.comparison.savings.original_distance_km, 1015.23);
    assert!(body.comparison.savings.savings_km > 0.0);
    assert_eq!(body.comparison.optimized_path.len(), 3);
    assert!(!body.gpx_base64.is_empty());
}

#[tokio::test]
async fn optimize_single_stop_has_zero_distance() {
    let req = OptimizeRouteRequest {
        stops: vec!["Madurai".into()],
        start: Some("Madurai".into()),
    };

    let (status, bytes) = send(
        test_app(),
        post_json("/api/route/optimize", serde_json::to_string(&req).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: OptimizeRouteResponse = parse(&bytes);
    assert_eq!(body.comparison.optimized_route, ["Madurai"]);
    assert_eq!(body.comparison.savings.optimized_distance_km, 0.0);
    assert_eq!(body.comparison.savings.savings_pct, 0.0);
}

#[tokio::test]
async fn optimize_rejects_unknown_city() {
    let payload = json!({ "stops": ["Chennai", "Narnia"] });

    let (status, bytes) = send(test_app(), post_json("/api/route/optimize", payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: ApiError = parse(&bytes);
    assert!(body.message.contains("Narnia"));
}

#[tokio::test]
async fn optimize_rejects_empty_stops() {
    let payload = json!({ "stops": [] });

    let (status, _) = send(test_app(), post_json("/api/route/optimize", payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cities_endpoint_lists_builtin_table() {
    let (status, bytes) = send(test_app(), get("/api/cities")).await;
    assert_eq!(status, StatusCode::OK);

    let cities: Vec<City> = parse(&bytes);
    assert_eq!(cities.len(), 15);
    assert!(cities.iter().any(|c| c.name == "Visakhapatnam"));
}

#[tokio::test]
async fn delay_endpoint_scores_shipment() {
    let payload = json!({
        "distance_km": 2400.0,
        "weight_g": 25000.0,
        "order_dow": 5,
        "order_month": 11,
        "freight_value": 320.0,
        "item_count": 4,
        "seller_city": "Delhi",
        "customer_city": "Chennai"
    });

    let (status, bytes) = send(test_app(), post_json("/api/delay", payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let body: DelayAssessment = parse(&bytes);
    assert_eq!(body.tier, RiskTier::High);
    assert!(!body.recommendations.is_empty());
}

#[tokio::test]
async fn delay_endpoint_rejects_bad_month() {
    let payload = json!({
        "distance_km": 100.0,
        "weight_g": 500.0,
        "order_dow": 1,
        "order_month": 13,
        "freight_value": 20.0,
        "item_count": 1,
        "seller_city": "Pune",
        "customer_city": "Mumbai"
    });

    let (status, _) = send(test_app(), post_json("/api/delay", payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn demand_endpoint_uses_requested_horizon() {
    let (status, bytes) = send(test_app(), get("/api/demand/Chennai?days=5")).await;
    assert_eq!(status, StatusCode::OK);

    let body: DemandForecast = parse(&bytes);
    assert_eq!(body.zone, "Chennai");
    assert_eq!(body.history.len(), 60);
    assert_eq!(body.forecast.len(), 5);
}

#[tokio::test]
async fn demand_endpoint_defaults_to_a_week() {
    let (status, bytes) = send(test_app(), get("/api/demand/Mumbai")).await;
    assert_eq!(status, StatusCode::OK);

    let body: DemandForecast = parse(&bytes);
    assert_eq!(body.forecast.len(), 7);
}

#[tokio::test]
async fn demand_endpoint_rejects_zero_horizon() {
    let (status, _) = send(test_app(), get("/api/demand/Chennai?days=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn zones_summary_lists_every_zone() {
    let (status, bytes) = send(test_app(), get("/api/zones/summary")).await;
    assert_eq!(status, StatusCode::OK);

    let body: Vec<ZoneSummary> = parse(&bytes);
    assert_eq!(body.len(), 10);
}

#[tokio::test]
async fn tracker_is_stable_for_a_seed() {
    let app = test_app();
    let (_, first) = send(app.clone(), get("/api/tracker?seed=11")).await;
    let (_, second) = send(app, get("/api/tracker?seed=11")).await;

    let first: Vec<DeliveryPosition> = parse(&first);
    let second: Vec<DeliveryPosition> = parse(&second);
    assert_eq!(first.len(), 5);
    assert_eq!(
        first.iter().map(|d| d.position).collect::<Vec<_>>(),
        second.iter().map(|d| d.position).collect::<Vec<_>>()
    );
}
