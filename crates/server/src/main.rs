//! sitecms server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sitecms_api::AppState;
use sitecms_common::{Config, LocalStorage, StorageService};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Create the configured admin account if it does not exist yet and drop
/// sessions that expired while the server was down.
async fn prepare_admin(state: &AppState, config: &Config) -> anyhow::Result<()> {
    match (&config.admin.email, &config.admin.password) {
        (Some(email), Some(password)) => {
            if state.auth_service.ensure_admin(email, password).await? {
                info!(email = %email, "Seeded admin account");
            }
        }
        (None, None) => {}
        _ => warn!("admin.email and admin.password must be set together; skipping admin seed"),
    }

    let purged = state.auth_service.purge_expired().await?;
    if purged > 0 {
        info!(count = purged, "Purged expired admin sessions");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecms=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting sitecms server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let mut db_opts = ConnectOptions::new(&config.database.url);
    db_opts
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections);

    let db = Arc::new(Database::connect(db_opts).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    sitecms_db::migrate(&db).await?;
    info!("Migrations completed");

    // Object storage
    let storage: StorageService = Arc::new(LocalStorage::new(
        config.storage.base_path.clone(),
        config.storage.base_url.clone(),
    ));

    let state = AppState::new(&db, storage, &config);
    prepare_admin(&state, &config).await?;

    // Build router
    let mut app = sitecms_api::app(state);
    if config.storage.base_url.starts_with('/') {
        app = app.nest_service(
            &config.storage.base_url,
            ServeDir::new(&config.storage.base_path),
        );
    }
    let app = app.layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
