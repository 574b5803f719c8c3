//! MCN Server - Musée des Civilisations Noires
//!
//! REST API backend for the museum's ticketing and visit companion app.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcn_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mcn_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MCN Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.booking.clone(), config.email.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Billets
        .route("/billets/disponibilites", get(api::tickets::availability))
        .route("/billets", post(api::tickets::create_ticket))
        .route("/billets/visiteur/:uuid", get(api::tickets::tickets_by_visitor))
        .route("/billets/validate/:qr_code", post(api::tickets::validate_qr_code))
        .route("/billets/:id/cancel", put(api::tickets::cancel_ticket))
        // Commandes
        .route("/commandes", post(api::orders::create_order))
        .route("/commandes/:id", get(api::orders::get_order))
        .route("/commandes/visiteur/:uuid", get(api::orders::orders_by_visitor))
        .route("/commandes/:id/status", put(api::orders::update_order_status))
        .route("/commandes/:id/cancel", put(api::orders::cancel_order))
        // Visiteurs
        .route("/visiteurs", post(api::visitors::create_visitor))
        .route("/visiteurs/:uuid", get(api::visitors::get_visitor))
        .route("/visiteurs/:uuid", put(api::visitors::update_visitor))
        .route("/visiteurs/:uuid/favorites", post(api::visitors::add_favorite))
        .route(
            "/visiteurs/:uuid/favorites/:oeuvre_id",
            delete(api::visitors::remove_favorite),
        )
        .route("/visiteurs/:uuid/historique", post(api::visitors::add_to_history))
        // Calendrier
        .route("/calendrier", get(api::calendar::month))
        .route("/calendrier/closures", post(api::calendar::create_closure))
        .route("/calendrier/closures/:id", delete(api::calendar::delete_closure))
        .route("/calendrier/evenements", post(api::calendar::create_event))
        .route("/calendrier/evenements/:id", delete(api::calendar::delete_event))
        // Tarifs
        .route("/tarifs", get(api::pricing::list_tarifs))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .route("/health", get(api::health::health_check))
        .nest("/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
