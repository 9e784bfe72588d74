//! NeXLet marketing-site backend - library for app logic and testing.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
pub mod validate;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use config::Config;
use db::Store;
use state::AppState;

/// Build the CORS layer from the configured comma-separated origins.
pub fn configure_cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&[
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]);

    create_app_with_cors(state, cors)
}

pub fn create_app_with_cors(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/", get(routes::root))
        .route(
            "/api/contact",
            post(routes::contact::create_contact).get(routes::contact::list_contacts),
        )
        .route("/api/newsletter", post(routes::newsletter::subscribe))
        .route(
            "/api/portfolio",
            get(routes::portfolio::list_portfolio).post(routes::portfolio::create_portfolio_item),
        )
        .route(
            "/api/portfolio/seed",
            post(routes::portfolio::seed_portfolio),
        )
        .route("/api/admin/login", post(routes::auth::login))
        .route("/health", get(routes::health::health_ping))
        .route("/health/ready", get(routes::health::health_ready))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
        .with_state(state)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the process lifetime; dropping them early
    // shuts down the background log-writer threads.
    let _log_guards = logging::init();

    let config = Config::from_env();

    // Refuse to start in production with the insecure default secret.
    if config.is_production() {
        if config.has_default_jwt_secret() {
            panic!(
                "FATAL: JWT_SECRET must be set to a secure, unique value in production. \
                 Refusing to start with the default secret."
            );
        }
        if config.has_default_admin_credentials() {
            tracing::warn!(
                "SECURITY: admin credentials are using the development fallback. \
                 Set ADMIN_USERNAME and ADMIN_PASSWORD_HASH before going live."
            );
        }
    }

    let store = Store::connect(&config.database_url)
        .await
        .expect("Failed to connect to document store");

    let state = AppState::new(store.clone(), &config);
    let app = create_app_with_cors(state, configure_cors(&config.cors_origins));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("shutting down, closing document store");
    store.close().await;
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
