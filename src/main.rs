use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use repo_activity_feed::config::{Config, LogFormat};
use repo_activity_feed::database;
use repo_activity_feed::services::PgEventStore;
use repo_activity_feed::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Load configuration
    let config = Arc::new(Config::from_env()?);

    init_tracing(config.log_format);
    info!("Starting repository activity feed...");

    let db_pool = database::new_pool(&config.database_url).await?;
    info!("Database connection pool created");

    if config.run_migrations {
        database::run_migrations(&db_pool).await?;
    }

    let store = Arc::new(PgEventStore::new(db_pool.clone()));
    let app = router(AppState::new(store, config.clone()));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    db_pool.close().await;
    info!("Shut down cleanly");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "repo_activity_feed=debug,tower_http=debug".into());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .init(),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix. A handler that fails to install is
/// logged and simply never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}
