//! services/api/src/bin/api.rs

use api_lib::{
    adapters::db::MongoAdapter,
    config::Config,
    error::ApiError,
    web::{self, state::AppState},
};
use mongodb::{bson::doc, Client};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to the Document Store ---
    info!("Connecting to MongoDB at {}...", config.mongodb_url);
    let client = Client::with_uri_str(&config.mongodb_url).await?;
    let db = client.database(&config.mongodb_name);

    // The driver connects lazily; ping here so an unreachable store fails
    // startup instead of the first request.
    db.run_command(doc! { "ping": 1 }).await.map_err(|e| {
        error!("MongoDB is unreachable: {e}");
        ApiError::Database(e)
    })?;
    info!("Connected to database '{}'.", config.mongodb_name);

    // --- 3. Build the Shared AppState ---
    let store = Arc::new(MongoAdapter::new(db));
    let app_state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = web::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", web::ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
