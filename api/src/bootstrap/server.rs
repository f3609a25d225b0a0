use std::future::Future;
use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::presentation::http::error::ApiError;

enum Stop {
    Requested,
    Server(Result<std::io::Result<()>, JoinError>),
}

/// Resolves once `hard_stop` flips to true or its sender is gone.
async fn hard_stopped(mut hard_stop: watch::Receiver<bool>) {
    loop {
        let stopped = *hard_stop.borrow_and_update();
        if stopped || hard_stop.changed().await.is_err() {
            return;
        }
    }
}

/// Serves `app` until `shutdown` resolves, then stops accepting and gives
/// in-flight requests `grace` to finish. Requests still running after that
/// are answered with a JSON 503 and their handlers dropped.
///
/// Returns an error when the server stops without `shutdown` having fired.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (hard_stop_tx, hard_stop_rx) = watch::channel(false);
    let app = app.layer(middleware::from_fn(move |req: Request, next: Next| {
        let hard_stop = hard_stop_rx.clone();
        async move {
            tokio::select! {
                res = next.run(req) => res,
                _ = hard_stopped(hard_stop) => ApiError::Unavailable.into_response(),
            }
        }
    }));

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut api_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    let stop = tokio::select! {
        _ = shutdown => Stop::Requested,
        res = &mut api_handle => Stop::Server(res),
    };

    match stop {
        Stop::Server(Ok(Ok(()))) => {
            anyhow::bail!("API server stopped without a shutdown request")
        }
        Stop::Server(Ok(Err(e))) => {
            error!(?e, "API server task failed");
            Err(e.into())
        }
        Stop::Server(Err(e)) => {
            error!(?e, "API server task panicked");
            Err(e.into())
        }
        Stop::Requested => {
            info!(grace_ms = grace.as_millis() as u64, "shutting down");
            let _ = stop_tx.send(());
            match tokio::time::timeout(grace, &mut api_handle).await {
                Ok(Ok(Ok(()))) => info!("in-flight requests drained"),
                Ok(Ok(Err(e))) => error!(?e, "API server task failed during shutdown"),
                Ok(Err(e)) => error!(?e, "API server task panicked during shutdown"),
                Err(_) => {
                    warn!("grace period elapsed, aborting in-flight requests");
                    let _ = hard_stop_tx.send(true);
                    api_handle.abort();
                }
            }
            Ok(())
        }
    }
}
