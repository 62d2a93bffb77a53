use routeiq::{AppState, config::AppConfig, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routeiq=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;
    tracing::info!(
        "serving {} cities, fuel {} L/km at ₹{}/L, seed {}",
        state.cities.len(),
        config.savings.fuel_l_per_km,
        config.savings.price_inr_per_litre,
        config.seed
    );
    let app = create_router(state);

    tracing::info!("starting routeiq on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
