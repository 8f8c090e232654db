use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use car_rental_backend::{
    config::{BackendConfig, Config},
    db,
    gateway::{BackendGateway, PgGateway, RestGateway},
    middleware::rate_limit::{create_global_governor, log_request},
    routes, AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_rental_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Starting server at {}", config.server_addr());

    let gateway = connect_backend(&config).await;
    let state = AppState::new(gateway);

    // Create router with middleware
    let app = routes::create_router(state)
        .layer(axum::middleware::from_fn(log_request))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
        )
        .layer(create_global_governor());

    // Start server with socket address for rate limiting
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}

/// Build the configured backend gateway, running migrations for the
/// self-hosted database
async fn connect_backend(config: &Config) -> Arc<dyn BackendGateway> {
    match &config.backend {
        BackendConfig::Postgres {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
        } => {
            let db = db::connect(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Connected to database");

            migration::Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
            tracing::info!("Migrations complete");

            Arc::new(PgGateway::new(
                db,
                jwt_secret.clone(),
                *jwt_expiration_hours,
            ))
        }
        BackendConfig::Rest { base_url, api_key } => {
            let gateway = RestGateway::new(base_url.as_str(), api_key.as_str())
                .expect("Failed to create backend HTTP client");
            tracing::info!("Using hosted backend at {}", base_url);
            Arc::new(gateway)
        }
    }
}
