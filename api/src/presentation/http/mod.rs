use std::time::Duration;

use axum::BoxError;
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::MatchedPath;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::trace::TraceLayer;

use crate::bootstrap::app_context::AppContext;
use crate::infrastructure::db::PgPool;
use crate::presentation::http::error::ApiError;

pub mod error;
pub mod health;
pub mod openapi;
pub mod users;

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("request_timed_out");
        ApiError::Timeout
    } else {
        tracing::error!(error = %err, "middleware_failed");
        ApiError::Internal
    }
}

/// Complete HTTP surface: users CRUD, health check and OpenAPI document,
/// wrapped in request tracing and the per-request timeout. A request that
/// times out is dropped together with its in-flight query and answered
/// with a JSON 408.
pub fn router(ctx: AppContext, pool: PgPool) -> Router {
    let timeout = Duration::from_secs(ctx.cfg.request_timeout_secs);
    Router::new()
        .merge(users::routes(ctx))
        .merge(health::routes(pool))
        .merge(openapi::routes())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
