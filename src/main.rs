use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use kontakt_webhook::config::Config;
use kontakt_webhook::db::{LeadStore, PgLeadStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting kontakt webhook ({:?})", config.environment);

    let mailer = kontakt_webhook::email::build_mailer(&config.provider)?;

    // Storage is optional: a missing or unreachable database never blocks email delivery
    let store: Option<Arc<dyn LeadStore>> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(5))
                .connect_lazy(url)?;

            match sqlx::migrate!("./migrations").run(&pool).await {
                Ok(()) => tracing::info!("Migrations applied"),
                Err(e) => tracing::warn!("Could not run migrations: {e}"),
            }

            Some(Arc::new(PgLeadStore::new(pool)) as Arc<dyn LeadStore>)
        }
        None => None,
    };

    let addr = SocketAddr::new(config.host, config.port);
    let state = kontakt_webhook::build_state(config, mailer, store);
    let app = kontakt_webhook::build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
