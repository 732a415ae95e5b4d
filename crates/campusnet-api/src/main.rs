//! `CampusNet` stories API server entry point.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use campusnet_api::config::AppConfig;
use campusnet_api::routes;
use campusnet_api::state::AppState;
use campusnet_api::telemetry;
use campusnet_core::clock::SystemClock;
use campusnet_store::pg_story_repository::PgStoryRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting CampusNet stories API server");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgStoryRepository::new(pool)),
        config.policy,
        config.playback,
    );

    // TODO: Replace CorsLayer::permissive() with the mobile client's origins.
    let app = routes::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app).await;

    if let Some(Err(e)) = tracer_provider.map(|provider| provider.shutdown()) {
        tracing::warn!(error = %e, "tracer provider shutdown failed");
    }

    served?;
    Ok(())
}
