use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::time::Duration;
use tracing::{error, info};

use users_api::bootstrap::app_context::{AppContext, AppServices};
use users_api::bootstrap::config::Config;
use users_api::bootstrap::server::serve;
use users_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "users_api=debug,tower_http=info,axum=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting users API");

    let pool = match users_api::infrastructure::db::connect_pool(&cfg.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = ?e, "database_connect_failed");
            return Err(e);
        }
    };

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let ctx = AppContext::new(cfg.clone(), AppServices::new(user_repo));
    let app = users_api::presentation::http::router(ctx, pool.clone());

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    info!(%api_addr, "HTTP API listening");

    let grace = Duration::from_secs(cfg.shutdown_grace_secs);
    let shutdown = async {
        let signal = shutdown_signal().await;
        info!(signal, "termination signal received");
    };
    let res = serve(listener, app, shutdown, grace).await;
    pool.close().await;
    res
}

/// Resolves with the name of the first termination signal received.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = ?e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = ?e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
