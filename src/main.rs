//! FileDepot server — file storage with metadata queries plus user auth.
//!
//! Main entry point that wires all crates together and starts the server.
//! Startup failures terminate the process here; the library crates only
//! ever return error values.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use filedepot_api::state::AppState;
use filedepot_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use filedepot_core::config::AppConfig;
use filedepot_core::error::AppError;
use filedepot_core::traits::BlobStore;
use filedepot_database::repositories::UserRepository;
use filedepot_service::{FileService, UserService};
use filedepot_storage::{FileIndex, LocalBlobStore, MemoryBlobStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("FILEDEPOT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileDepot v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = filedepot_database::connection::create_pool(&config.database).await?;
    filedepot_database::migration::run_migrations(&db_pool).await?;

    // ── Blob store + index ───────────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing blob store");
    let blob_store: Arc<dyn BlobStore> = match config.storage.provider.as_str() {
        "memory" => Arc::new(MemoryBlobStore::new()),
        "local" => Arc::new(LocalBlobStore::new(&config.storage.root_path).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider: {other}"
            )));
        }
    };
    let index = Arc::new(FileIndex::new(blob_store.clone()));

    // ── Services ─────────────────────────────────────────────────
    let file_service = Arc::new(FileService::new(
        index,
        Duration::from_secs(config.storage.op_timeout_seconds),
    ));
    let user_repo = Arc::new(UserRepository::new(db_pool));
    let user_service = Arc::new(UserService::new(
        user_repo,
        PasswordHasher::new(),
        JwtEncoder::new(&config.auth),
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        file_service,
        user_service,
        jwt_decoder,
        blob_store,
    };

    let app = filedepot_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("FileDepot server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
